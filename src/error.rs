//! Error types shared by the fetch, persistence and upload collaborators.
//!
//! The article extractor never surfaces these to its caller; it folds them
//! into an [`ExtractionResult`](crate::models::ExtractionResult) diagnostic.
//! Listing fetch failures, on the other hand, propagate up to `main`.

use thiserror::Error;

/// Everything that can go wrong outside of HTML/JSON parsing.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body-decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured header value could not be encoded.
    #[error("invalid header: {0}")]
    Header(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The object store rejected or failed the upload.
    #[error("upload failed: {0}")]
    Upload(String),
}

impl ScrapeError {
    /// Classify a reqwest error, pulling timeouts out into their own variant.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout {
                url: url.to_string(),
            }
        } else {
            ScrapeError::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ScrapeError::Status {
            url: "https://example.com/a".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://example.com/a returned HTTP 404");
    }

    #[test]
    fn test_timeout_display() {
        let err = ScrapeError::Timeout {
            url: "https://example.com/a".to_string(),
        };
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_url_error_converts() {
        let err: ScrapeError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ScrapeError::InvalidUrl(_)));
    }
}
