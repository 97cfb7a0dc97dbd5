//! Character lookup: the boundary between callers and the upstream site.
//!
//! [`JobLookup`] validates the character id, builds the upstream URL, fetches
//! the page through a [`PageSource`] and runs the extraction pipeline.
//! [`JobLookup::respond`] additionally folds every outcome into an
//! [`ApiResponse`], so nothing escapes the boundary as a Rust error.
//!
//! # Example
//!
//! ```rust,no_run
//! use lodestone_jobs::{JobLookup, LookupConfig, UpstreamClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = LookupConfig::load()?;
//! let lookup = JobLookup::new(config.clone(), UpstreamClient::from_config(&config)?);
//!
//! let response = lookup.respond("12345678").await;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use http::header::CACHE_CONTROL;
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::{LookupConfig, ID_PLACEHOLDER};
use crate::error::{FetchError, LookupError, Result};
use crate::extract::{is_view_source, parse_character_page, Group};
use crate::model::CharacterJobs;

/// Source of raw page text for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page body. Must give up after a bounded time.
    async fn fetch_page(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// JSON body returned for a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub url: String,
}

/// Transport-neutral response for one lookup.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Always `no-store`.
    pub cache_control: HeaderValue,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            cache_control: HeaderValue::from_static("no-store"),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Convert into an `http::Response` for embedding in a server.
    pub fn into_http(self) -> http::Response<String> {
        let mut response = http::Response::new(self.body.to_string());
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(CACHE_CONTROL, self.cache_control);
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        response
    }
}

/// Percent-encode a (trimmed) character id into a URL template.
pub fn upstream_url(template: &str, id: &str) -> String {
    template.replace(ID_PLACEHOLDER, &urlencoding::encode(id.trim()))
}

/// Looks up character job pages.
pub struct JobLookup<S> {
    config: LookupConfig,
    source: S,
}

impl<S: PageSource> JobLookup<S> {
    pub fn new(config: LookupConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Upstream URL for a character id.
    pub fn upstream_url(&self, id: &str) -> String {
        upstream_url(&self.config.url_template, id)
    }

    /// Fetch and parse a character's job page.
    #[instrument(skip(self))]
    pub async fn lookup(&self, id: &str) -> Result<CharacterJobs> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LookupError::EmptyId);
        }

        let url = self.upstream_url(id);
        let raw = self
            .source
            .fetch_page(&url)
            .await
            .map_err(|source| LookupError::Fetch {
                url: url.clone(),
                source,
            })?;

        let jobs = parse_character_page(&raw);
        info!(
            bytes = raw.len(),
            view_source = is_view_source(&raw),
            combat = jobs.group_job_count(Group::Combat),
            vocation = jobs.group_job_count(Group::Vocation),
            "Parsed character page"
        );
        Ok(jobs)
    }

    /// Run a lookup and fold the outcome into a response.
    pub async fn respond(&self, id: &str) -> ApiResponse {
        match self.lookup(id).await {
            Ok(jobs) => match serde_json::to_value(&jobs) {
                Ok(body) => ApiResponse::new(StatusCode::OK, body),
                Err(err) => self.failure(id, StatusCode::BAD_GATEWAY, err.to_string()),
            },
            Err(err) => {
                warn!(id, error = %err, "Character lookup failed");
                self.failure(id, err.status(), err.to_string())
            }
        }
    }

    fn failure(&self, id: &str, status: StatusCode, message: String) -> ApiResponse {
        let body = ErrorBody {
            error: message,
            url: self.upstream_url(id),
        };
        ApiResponse::new(status, serde_json::to_value(body).unwrap_or(Value::Null))
    }
}
