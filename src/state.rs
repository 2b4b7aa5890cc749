//! Application state management for surfsup.
//!
//! The state is built once at startup and handed to every handler through
//! axum's `State` extractor. It holds no per-request data.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Pooled access to the dataset
    pub database: Database,
    /// Dataset file the pool was opened on
    pub dataset_path: PathBuf,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, database: Database, dataset_path: PathBuf) -> Self {
        Self {
            config,
            database,
            dataset_path,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, database: Database, dataset_path: PathBuf) -> Arc<Self> {
        Arc::new(Self::new(config, database, dataset_path))
    }
}
