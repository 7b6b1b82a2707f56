//! Cache error types.

use std::io;

use thiserror::Error;

/// Errors that can occur during feed store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("I/O error while trying to {operation}: {message}")]
    Io {
        operation: &'static str,
        kind: io::ErrorKind,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Stored cache is corrupted: {0}")]
    Corrupted(String),

    #[error("Cache operation failed: {0}")]
    Operation(String),

    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Store closed before the operation completed")]
    Closed,
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, error: io::Error) -> Self {
        StoreError::Io {
            operation,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error.to_string())
    }
}
