use std::path::PathBuf;

use thiserror::Error;

use crate::cache::StoreError;
use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::logger::LoggerError;
use crate::remote::{HttpClientError, RemoteError};

/// Error surfaced by the command-line front end.
///
/// Library modules keep their own error enums; this type wraps them with
/// enough context to report a failed command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Logger could not be installed
    #[error(transparent)]
    Logger(#[from] LoggerError),

    /// Feed store operation failed
    #[error("Cache operation failed: {operation}")]
    Cache {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// Remote feed could not be loaded
    #[error("Remote feed unavailable")]
    Remote(#[from] RemoteError),

    /// HTTP client could not be built
    #[error(transparent)]
    HttpClient(#[from] HttpClientError),

    /// Input file could not be read or decoded
    #[error("Invalid input file '{}'", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn cache(operation: &'static str, source: StoreError) -> Self {
        AppError::Cache { operation, source }
    }

    pub fn input(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Input {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<FeedError> for AppError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::Cache(source) => AppError::cache("load", source),
            FeedError::Remote(source) => AppError::Remote(source),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
