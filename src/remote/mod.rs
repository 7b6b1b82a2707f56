//! Remote feed API.
//!
//! Fetches the feed over HTTP and maps the JSON payload into [`FeedItem`]s.
//!
//! [`FeedItem`]: crate::feed::FeedItem

mod client;
mod error;
mod loader;
mod mapper;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use error::{HttpClientError, RemoteError};
pub use loader::RemoteFeedLoader;
pub use mapper::FeedItemMapper;
