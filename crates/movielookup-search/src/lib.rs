//! HTTP transport for title searches.

pub mod client;

pub use client::{DEFAULT_SEARCH_URL, SearchClient};
