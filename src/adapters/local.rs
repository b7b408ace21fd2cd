//! Local fetcher for a site checked out on disk (`file://` URLs).

use async_trait::async_trait;
use tokio::fs;
use url::Url;

use super::{ContentFetcher, FetchError};

/// Reads JSON files straight from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

impl LocalFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentFetcher for LocalFetcher {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::UnsupportedScheme {
                url: url.to_string(),
            })?;

        let content = fs::read(&path).await.map_err(|source| FetchError::Io {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&content).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("posts.json");
        std::fs::write(&path, r#"[{"title":"Hello"}]"#).unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let value = LocalFetcher::new().fetch_json(&url).await.unwrap();

        assert_eq!(value[0]["title"], "Hello");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let url = Url::from_file_path(temp.path().join("missing.json")).unwrap();

        let err = LocalFetcher::new().fetch_json(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "[{").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let err = LocalFetcher::new().fetch_json(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }
}
