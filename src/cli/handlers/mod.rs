//! Command handlers for CLI operations
//!
//! Handlers hold the collaborators a command needs and return plain values;
//! printing is left to the executor.

pub mod cache;
pub mod fetch;

pub use cache::CacheCommandHandler;
pub use fetch::FetchCommandHandler;
