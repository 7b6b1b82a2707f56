//! Remote loading error types.

use thiserror::Error;

/// Errors delivered by [`RemoteFeedLoader`](super::RemoteFeedLoader).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Could not reach the feed endpoint")]
    Connectivity,

    #[error("Feed endpoint returned invalid data")]
    InvalidData,
}

/// Transport failure reported by an [`HttpClient`](super::HttpClient).
#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}
