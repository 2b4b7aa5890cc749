//! # surfsup
//!
//! A read-only JSON API over the Hawaii weather observation dataset.
//!
//! The dataset is a SQLite file with a `measurement` table (daily
//! precipitation and temperature readings per station) and a `station` table.
//! The server exposes precipitation by date, the station list, the last year
//! of readings for the busiest station, and temperature summaries over a date
//! window.
//!
//! ## Architecture
//!
//! - **Data Layer**: a read-only `sqlx` pool; each request holds one pooled
//!   connection through a [`db::Session`]
//! - **Schema**: the expected tables and columns are declared statically and
//!   checked once at startup
//! - **API Layer**: one axum handler per route, sharing an [`AppState`]

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod schema;
pub mod state;

pub use config::Config;
pub use db::{Database, Session, TemperatureStats};
pub use error::{Result, SurfsUpError};
pub use handlers::create_router;
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_operation_end, log_operation_start, log_request_error,
};
pub use state::AppState;
