//! Storage error types.
//!
//! Every store operation returns [`Result`], so callers can tell "empty" from "failed".

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::Backend;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unknown backend identifier or incomplete settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The engine could not be reached (missing file access, auth failure, unreachable host).
    #[error("Connection error ({backend}): {message}")]
    Connection { backend: Backend, message: String },

    /// The embedded database directory could not be prepared.
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Constraint violation or malformed query.
    #[error("Statement error: {0}")]
    Statement(String),

    #[error("Operation '{operation}' timed out after {}s", .timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorageError {
    pub(crate) fn connection(backend: Backend, err: sqlx::Error) -> Self {
        StorageError::Connection {
            backend,
            message: err.to_string(),
        }
    }

    pub(crate) fn statement(err: sqlx::Error) -> Self {
        StorageError::Statement(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
