//! Temperature summary endpoint handlers.
//!
//! `/api/v1.0/<start>` and `/api/v1.0/<start>/<end>` return the minimum,
//! average and maximum temperature over a date window. Path dates are
//! `DD-MM-YYYY`; they are validated as calendar dates, then rendered in the
//! dataset's `YYYY-MM-DD` form and compared as text against the `date` column.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{Result, SurfsUpError};
use crate::handlers::error_response;
use crate::handlers::tobs::STORED_DATE_FORMAT;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Format accepted for dates in the request path
pub const PATH_DATE_FORMAT: &str = "%d-%m-%Y";

/// Rejection message for `/api/v1.0/<start>`
pub const START_DATE_ERROR: &str = "Invalid date format. Please use DD-MM-YYYY format.";

/// Rejection message for `/api/v1.0/<start>/<end>`.
///
/// The wording says YYYY-MM-DD although DD-MM-YYYY is what gets accepted;
/// clients already match on this text.
pub const RANGE_DATE_ERROR: &str = "Invalid date format. Please use YYYY-MM-DD format.";

/// Temperature statistics for a date window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSummary {
    /// Start date exactly as given in the path
    pub start_date: String,
    /// End date exactly as given in the path, absent for open-ended windows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub min_temperature: Option<f64>,
    pub avg_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

/// Handle GET /api/v1.0/<start> requests
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    respond(&state, "/api/v1.0/<start>", start, None).await
}

/// Handle GET /api/v1.0/<start>/<end> requests
pub async fn start_end_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    respond(&state, "/api/v1.0/<start>/<end>", start, Some(end)).await
}

async fn respond(
    state: &AppState,
    endpoint: &str,
    start: String,
    end: Option<String>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let params = match &end {
        Some(end) => format!("start={}, end={}", start, end),
        None => format!("start={}", start),
    };

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        params = %params,
        "Processing temperature summary request"
    );

    match summarize(&state.database, start, end).await {
        Ok(summary) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Temperature summary request successful"
            );
            Json(summary).into_response()
        }
        Err(error) => error_response(error, endpoint, &request_id, Some(&params)),
    }
}

/// Validate the path dates and aggregate temperatures over the window
pub async fn summarize(
    database: &Database,
    start: String,
    end: Option<String>,
) -> Result<TemperatureSummary> {
    let message = if end.is_some() {
        RANGE_DATE_ERROR
    } else {
        START_DATE_ERROR
    };

    let start_bound = stored_form(parse_path_date(&start, message)?);
    let end_bound = match &end {
        Some(end) => Some(stored_form(parse_path_date(end, message)?)),
        None => None,
    };

    let stats = database
        .session()
        .await?
        .temperature_summary(&start_bound, end_bound.as_deref())
        .await?;

    debug!(
        start = %start_bound,
        end = ?end_bound,
        records = stats.count,
        "Aggregated temperature window"
    );

    Ok(TemperatureSummary {
        start_date: start,
        end_date: end,
        min_temperature: stats.min,
        avg_temperature: stats.avg,
        max_temperature: stats.max,
    })
}

/// Parse a `DD-MM-YYYY` path segment, failing with `message`
pub fn parse_path_date(raw: &str, message: &str) -> Result<NaiveDate> {
    let invalid = || SurfsUpError::InvalidDate {
        message: message.to_string(),
    };

    // chrono's %Y takes any width, the year segment must be four digits
    if !has_path_date_shape(raw) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, PATH_DATE_FORMAT).map_err(|_| invalid())
}

/// Day and month of one or two digits, year of exactly four
fn has_path_date_shape(raw: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    let parts: Vec<&str> = raw.split('-').collect();
    matches!(
        parts.as_slice(),
        [day, month, year] if digits(*day, 1, 2) && digits(*month, 1, 2) && digits(*year, 4, 4)
    )
}

fn stored_form(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}
