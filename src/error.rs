//! Error types for character lookups.
//!
//! Only input and network problems are errors. Irregular upstream markup is
//! absorbed by the extraction pipeline and never surfaces here.

use http::StatusCode;
use thiserror::Error;

/// Failure of a single upstream page fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream responded with status {0}")]
    Status(StatusCode),

    #[error("upstream request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        match err.status() {
            Some(status) => Self::Status(status),
            None => Self::Transport(err.to_string()),
        }
    }
}

/// Failure of a character lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("character id must not be empty")]
    EmptyId,

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl LookupError {
    /// Gateway-style status reported to the caller for this failure.
    pub fn status(&self) -> StatusCode {
        if self.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::BAD_GATEWAY
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Fetch {
                source: FetchError::Timeout,
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let err = LookupError::Fetch {
            url: "https://example.com".into(),
            source: FetchError::Timeout,
        };
        assert!(err.is_timeout());
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn upstream_status_maps_to_bad_gateway() {
        let err = LookupError::Fetch {
            url: "https://example.com".into(),
            source: FetchError::Status(StatusCode::NOT_FOUND),
        };
        assert!(!err.is_timeout());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn empty_id_is_gateway_style_too() {
        assert_eq!(LookupError::EmptyId.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            LookupError::EmptyId.to_string(),
            "character id must not be empty"
        );
    }
}
