//! Content fetchers for the site's JSON indexes.
//!
//! Fetchers resolve a URL to parsed JSON. The site may be served over HTTP
//! or read straight from a local checkout (`file://` URLs); [`SiteFetcher`]
//! picks the right one per URL. Nothing is cached: every call reads fresh.

pub mod http;
pub mod local;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::library::RawItem;

pub use http::HttpFetcher;
pub use local::LocalFetcher;

/// Errors raised while loading a content index
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not load {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Could not load {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("Could not load {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },

    #[error("Could not parse {url}: {source}")]
    Parse {
        url: String,
        source: serde_json::Error,
    },

    #[error("Unsupported URL scheme: {url}")]
    UnsupportedScheme { url: String },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Io { url, .. }
            | FetchError::Parse { url, .. }
            | FetchError::UnsupportedScheme { url } => url,
        }
    }
}

/// Trait for content fetchers
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Human-readable fetcher name
    fn name(&self) -> &str;

    /// Load and parse one JSON document, bypassing any cache
    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError>;
}

/// Load a JSON index as raw items. A `null` document is an empty index.
pub async fn fetch_items(
    fetcher: &dyn ContentFetcher,
    url: &Url,
) -> Result<Vec<RawItem>, FetchError> {
    let value = fetcher.fetch_json(url).await?;

    let items: Option<Vec<RawItem>> =
        serde_json::from_value(value).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })?;

    let items = items.unwrap_or_default();
    debug!(url = %url, count = items.len(), fetcher = fetcher.name(), "Loaded index");
    Ok(items)
}

/// Dispatches to HTTP or local file fetching by URL scheme
#[derive(Debug, Default)]
pub struct SiteFetcher {
    http: HttpFetcher,
    local: LocalFetcher,
}

impl SiteFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentFetcher for SiteFetcher {
    fn name(&self) -> &str {
        "site"
    }

    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        match url.scheme() {
            "http" | "https" => self.http.fetch_json(url).await,
            "file" => self.local.fetch_json(url).await,
            _ => Err(FetchError::UnsupportedScheme {
                url: url.to_string(),
            }),
        }
    }
}
