//! Error types for the surfsup application.
//!
//! This module defines a single error enum covering every failure the server
//! can hit, from configuration through dataset access to request validation.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// Dataset connection and query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The dataset does not expose the expected tables or columns
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A date path parameter did not match the accepted format
    #[error("{message}")]
    InvalidDate { message: String },

    /// A value stored in the dataset could not be interpreted
    #[error("Data format error: {message}")]
    DataFormat { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// HTTP status a handler should answer with when this error reaches it.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsUpError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
