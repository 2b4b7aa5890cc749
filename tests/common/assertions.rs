//! Assertion utilities for testing.
//!
//! Helpers for floating-point comparisons and for checking the shape of the
//! JSON payloads the server returns.

use pretty_assertions::assert_eq;
use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert a temperature summary payload.
///
/// `expected` is `(min, avg, max)`, or `None` when no reading should match.
pub fn assert_summary(json: &Value, expected: Option<(f64, f64, f64)>) {
    let fields = ["min_temperature", "avg_temperature", "max_temperature"];
    match expected {
        Some((min, avg, max)) => {
            for (field, want) in fields.iter().zip([min, avg, max]) {
                let got = json[field]
                    .as_f64()
                    .unwrap_or_else(|| panic!("{} is not a number in {}", field, json));
                assert_approx_eq(got, want, None);
            }
            assert!(min <= avg && avg <= max);
        }
        None => {
            for field in fields {
                assert_eq!(json[field], Value::Null, "{} should be null", field);
            }
        }
    }
}

/// Split a flattened `[date, tobs, ...]` array into pairs
pub fn tobs_pairs(json: &Value) -> Vec<(String, Option<f64>)> {
    let values = json.as_array().expect("tobs payload is not an array");
    assert_eq!(values.len() % 2, 0, "tobs payload has an odd length");

    values
        .chunks(2)
        .map(|pair| {
            let date = pair[0].as_str().expect("date is not a string").to_string();
            (date, pair[1].as_f64())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{assert_approx_eq, tobs_pairs};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(65.0, 65.0000000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_tobs_pairs() {
        let json = serde_json::json!(["2017-01-01", 70.0, "2017-01-02", null]);
        assert_eq!(
            tobs_pairs(&json),
            vec![
                ("2017-01-01".to_string(), Some(70.0)),
                ("2017-01-02".to_string(), None)
            ]
        );
    }
}
