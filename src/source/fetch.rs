use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Failure to obtain CSV text from a configured source.
///
/// The only condition in the system that surfaces to callers as an error;
/// malformed content degrades inside the parser instead.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to fetch CSV: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV endpoint returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to read CSV file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no {0} source configured")]
    NotConfigured(&'static str),
}

/// Where one extract comes from: an HTTP(S) endpoint (typically the vendor
/// relay) or a file on disk (the extracts are also distributed as static
/// files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Url(String),
    File(PathBuf),
}

impl CsvSource {
    /// Interpret a CLI/config value: anything starting with `http://` or
    /// `https://` is a URL, everything else a filesystem path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Fetch the raw CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] or [`SourceError::Status`] for URL
    /// sources, [`SourceError::Io`] for file sources. No retries here: the
    /// relay endpoint owns availability, and a failed load is surfaced to the
    /// query that triggered it.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String, SourceError> {
        match self {
            Self::Url(url) => {
                debug!(url, "fetching CSV");
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.text().await?)
            }
            Self::File(path) => {
                debug!(path = %path.display(), "reading CSV");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

impl std::fmt::Display for CsvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_vs_path() {
        assert_eq!(
            CsvSource::parse("https://example.com/stock.csv"),
            CsvSource::Url("https://example.com/stock.csv".to_string())
        );
        assert_eq!(
            CsvSource::parse("data/stock.csv"),
            CsvSource::File(PathBuf::from("data/stock.csv"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let source = CsvSource::File(PathBuf::from("/nonexistent/stock.csv"));
        let client = reqwest::Client::new();
        let err = source.fetch(&client).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
