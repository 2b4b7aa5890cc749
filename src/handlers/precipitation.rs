//! Precipitation endpoint handler.
//!
//! Returns every precipitation reading keyed by its date.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::Result;
use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing precipitation request"
    );

    match precipitation_by_date(&state.database).await {
        Ok(by_date) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                dates = by_date.len(),
                "Precipitation request successful"
            );
            Json(by_date).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

async fn precipitation_by_date(database: &Database) -> Result<BTreeMap<String, Option<f64>>> {
    let rows = database.session().await?.precipitation().await?;
    Ok(fold_by_date(rows))
}

/// Key readings by date. A later row with the same date replaces the earlier one.
fn fold_by_date(rows: Vec<(String, Option<f64>)>) -> BTreeMap<String, Option<f64>> {
    rows.into_iter().collect()
}
