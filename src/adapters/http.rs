//! HTTP fetcher for a published site.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use url::Url;

use super::{ContentFetcher, FetchError};

/// Fetches JSON over HTTP(S) with caching disabled
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    /// HTTP client
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store, no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
