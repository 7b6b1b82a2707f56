//! HTTP client seam and its reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use super::HttpClientError;

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal GET-only client so loaders can be tested without a network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpClientError>;
}

/// [`HttpClient`] backed by `reqwest`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("feed-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpClientError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpClientError::UnsupportedScheme(url.scheme().to_string()));
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(%url, status, bytes = body.len(), "Fetched remote feed");
        Ok(HttpResponse { status, body })
    }
}
