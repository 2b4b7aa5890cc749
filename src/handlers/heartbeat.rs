//! Heartbeat endpoint handler.
//!
//! Returns server status information: uptime and a snapshot of the dataset.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: Lazy<SystemTime> = Lazy::new(SystemTime::now);

/// Pin the start time; called when the router is built
pub(crate) fn record_start_time() {
    Lazy::force(&START_TIME);
}

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Configured listen address
    pub listen_address: String,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Dataset file path
    pub file_path: String,
    /// Number of measurement rows
    pub measurement_count: i64,
    /// Number of station rows
    pub station_count: i64,
    /// Most recent measurement date
    pub latest_date: Option<String>,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();

    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    match dataset_info(&state).await {
        Ok(dataset) => Json(HeartbeatResponse {
            server_id: SERVER_ID.clone(),
            timestamp,
            uptime_seconds: uptime.as_secs(),
            listen_address: format!(
                "{}:{}",
                state.config.server.host, state.config.server.port
            ),
            dataset,
            status: "healthy".to_string(),
        })
        .into_response(),
        Err(error) => error_response(error, "/heartbeat", &request_id, None),
    }
}

async fn dataset_info(state: &AppState) -> Result<DatasetInfo> {
    let mut session = state.database.session().await?;
    Ok(DatasetInfo {
        file_path: state.dataset_path.display().to_string(),
        measurement_count: session.measurement_count().await?,
        station_count: session.station_count().await?,
        latest_date: session.latest_measurement_date().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::sample_dataset;
    use crate::handlers::test_helpers::{get_json, router_for};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_heartbeat_reports_dataset() {
        let router = router_for(sample_dataset().await);
        let (status, json) = get_json(router, "/heartbeat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["server_id"], SERVER_ID.as_str());
        assert!(json["uptime_seconds"].is_u64());
        assert_eq!(json["listen_address"], "127.0.0.1:5000");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());

        let dataset = &json["dataset"];
        assert_eq!(dataset["file_path"], "memory");
        assert_eq!(dataset["measurement_count"], 6);
        assert_eq!(dataset["station_count"], 2);
        assert_eq!(dataset["latest_date"], "2017-08-23");
    }
}
