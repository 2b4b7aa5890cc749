//! Temperature observation endpoint handler.
//!
//! Returns the last year of temperature readings for the station with the
//! most measurements, flattened into `[date, tobs, date, tobs, ...]`.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{Result, SurfsUpError};
use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Format of the `date` column in the dataset
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the look-back window ending at the latest measurement
pub const WINDOW_DAYS: u64 = 365;

/// One element of the flattened temperature series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TobsValue {
    /// Observation date
    Date(String),
    /// Temperature observed on the preceding date
    Temperature(Option<f64>),
}

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing temperature observation request"
    );

    match most_active_station_year(&state.database).await {
        Ok(series) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                observations = series.len() / 2,
                "Temperature observation request successful"
            );
            Json(series).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

async fn most_active_station_year(database: &Database) -> Result<Vec<TobsValue>> {
    let mut session = database.session().await?;

    let Some(latest) = session.latest_measurement_date().await? else {
        debug!("Dataset has no measurements");
        return Ok(Vec::new());
    };
    let cutoff = one_year_before(&latest)?;
    debug!(latest = %latest, cutoff = %cutoff, "Computed look-back window");

    let Some(station) = session.most_active_station().await? else {
        return Ok(Vec::new());
    };
    debug!(station = %station, "Found most active station");

    let rows = session.temperatures_since(&station, &cutoff).await?;
    debug!(station = %station, rows = rows.len(), "Fetched temperature observations");

    Ok(flatten(rows))
}

/// Date `WINDOW_DAYS` days before `latest`, in the stored date format
pub fn one_year_before(latest: &str) -> Result<String> {
    let latest_date = NaiveDate::parse_from_str(latest, STORED_DATE_FORMAT).map_err(|e| {
        SurfsUpError::DataFormat {
            message: format!("Stored date {} is not YYYY-MM-DD: {}", latest, e),
        }
    })?;

    let cutoff = latest_date
        .checked_sub_days(Days::new(WINDOW_DAYS))
        .ok_or_else(|| SurfsUpError::DataFormat {
            message: format!("Stored date {} is too early to look back from", latest),
        })?;

    Ok(cutoff.format(STORED_DATE_FORMAT).to_string())
}

/// Row-major flatten of (date, temperature) pairs
fn flatten(rows: Vec<(String, Option<f64>)>) -> Vec<TobsValue> {
    rows.into_iter()
        .flat_map(|(date, tobs)| [TobsValue::Date(date), TobsValue::Temperature(tobs)])
        .collect()
}
