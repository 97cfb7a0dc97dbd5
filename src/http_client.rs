//! Upstream HTTP client
//!
//! Features:
//! - Identifying `User-Agent` (the default reqwest one is commonly blocked)
//! - Brotli, Zstd, Gzip compression (auto-negotiated)
//! - TLS via rustls
//! - One fixed total timeout per request, no retries

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::LookupConfig;
use crate::error::FetchError;
use crate::lookup::PageSource;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP client for character pages.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client with default settings.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(&LookupConfig::default())
    }

    /// Create a client using the configured user agent and timeout.
    pub fn from_config(config: &LookupConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let timeout = config.timeout();
        let client = Client::builder()
            // ═══════════════════════════════════════════════════════════════
            // CONNECTION
            // ═══════════════════════════════════════════════════════════════
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            // ═══════════════════════════════════════════════════════════════
            // COMPRESSION (auto-negotiated via Accept-Encoding)
            // ═══════════════════════════════════════════════════════════════
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            // ═══════════════════════════════════════════════════════════════
            // IDENTIFICATION
            // ═══════════════════════════════════════════════════════════════
            .default_headers(headers)
            // ═══════════════════════════════════════════════════════════════
            // TIMEOUTS (total, covers connect + body)
            // ═══════════════════════════════════════════════════════════════
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageSource for UpstreamClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching character page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        info!(
            status = %status,
            version = ?response.version(),
            content_encoding = ?response.headers().get("content-encoding"),
            "Response received"
        );

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        let client = UpstreamClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn honors_configured_timeout() {
        let config = LookupConfig {
            timeout_secs: 3,
            ..LookupConfig::default()
        };
        let client = UpstreamClient::from_config(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_unprintable_user_agent() {
        let config = LookupConfig {
            user_agent: "bad\nagent".into(),
            ..LookupConfig::default()
        };
        assert!(UpstreamClient::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = UpstreamClient::new().unwrap();
        let err = client
            .fetch_page("http://127.0.0.1:9/lodestone/character/1/class_job/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_) | FetchError::Timeout));
    }

    #[tokio::test]
    async fn silent_upstream_is_a_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold connections without ever answering
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = LookupConfig {
            timeout_secs: 1,
            ..LookupConfig::default()
        };
        let client = UpstreamClient::from_config(&config).unwrap();
        let err = client
            .fetch_page(&format!("http://{addr}/lodestone/character/1/class_job/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout));
    }
}
