//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them together.

pub mod heartbeat;
pub mod home;
pub mod precipitation;
pub mod stations;
pub mod summary;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use summary::{start_end_handler, start_handler};
pub use tobs::tobs_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::error::SurfsUpError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the full router over the shared application state
pub fn create_router(state: Arc<AppState>) -> Router {
    heartbeat::record_start_time();

    Router::new()
        .route("/", get(home_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_handler))
        .route("/api/v1.0/:start/:end", get(start_end_handler))
        .layer(
            ServiceBuilder::new()
                .layer(create_http_trace_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Log a failed request and turn the error into its HTTP response.
///
/// Client errors echo the message; server errors stay opaque apart from the
/// request id that ties the response to the log line.
pub(crate) fn error_response(
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    let status = error.status_code();
    let body = if status.is_client_error() {
        serde_json::json!({ "error": error.to_string() })
    } else {
        serde_json::json!({
            "error": "Internal server error",
            "request_id": request_id
        })
    };

    (status, Json(body)).into_response()
}
