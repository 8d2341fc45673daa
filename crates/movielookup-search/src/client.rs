//! HTTP search client for the title find endpoint.

use std::time::Duration;

use movielookup_core::{SearchError, SearchService};
use tracing::info;

pub const DEFAULT_SEARCH_URL: &str = "https://www.imdb.com/find";

/// HTTP client issuing `GET <endpoint>?q=<title>` and returning the page body.
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    /// Create a client for the given search endpoint.
    ///
    /// `endpoint` should be like `https://www.imdb.com/find` (a trailing slash
    /// is trimmed). Every request is bounded by `timeout`.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("movielookup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Transport(Box::new(e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, query: &str) -> reqwest::RequestBuilder {
        self.client.get(&self.endpoint).query(&[("q", query)])
    }
}

#[async_trait::async_trait]
impl SearchService for SearchClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let transport = |e: reqwest::Error| SearchError::Transport(Box::new(e));

        let request = self.request(query).build().map_err(transport)?;
        info!(url = %request.url(), "searching");
        let resp = self.client.execute(request).await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(transport)?;
        info!(bytes = body.len(), "search complete");
        Ok(body)
    }
}
