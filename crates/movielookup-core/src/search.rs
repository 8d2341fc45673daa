//! Search collaborator seam: free-text title query in, raw result document out.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// A search endpoint returning the raw results document for a title query.
///
/// Implementations block the reconciliation loop until a response or a
/// transport failure arrives; the loop never has two searches in flight.
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}
