//! HTTP client for the CDX index
//!
//! This module handles all HTTP requests to the archive index, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Building the per-domain CDX query
//! - Classifying transport and status failures

use crate::archive::fetch::{ArchiveIndex, FetchOutcome};
use crate::config::FetcherConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the CDX query URL listing every archived URL under a domain
///
/// The query matches `*.<domain>/*`, collapses repeated captures of the same
/// URL key and asks for the original URL only, as plain text.
///
/// # Example
///
/// ```
/// use wayback_fetch::archive::build_query_url;
///
/// let url = build_query_url("https://web.archive.org/cdx/search/cdx", "example.com").unwrap();
/// assert!(url.as_str().contains("collapse=urlkey"));
/// ```
pub fn build_query_url(endpoint: &str, domain: &str) -> Result<Url, url::ParseError> {
    let pattern = format!("*.{}/*", domain);
    Url::parse_with_params(
        endpoint,
        &[
            ("url", pattern.as_str()),
            ("collapse", "urlkey"),
            ("output", "text"),
            ("fl", "original"),
        ],
    )
}

/// Archive index backed by a CDX HTTP endpoint
#[derive(Debug, Clone)]
pub struct CdxClient {
    client: Client,
    endpoint: String,
}

impl CdxClient {
    /// Creates a client for the configured endpoint
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint this client queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the archived URLs of one domain
    ///
    /// # Failure Handling
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | Non-2xx status | `HttpError`, not retried |
    /// | Timeout | `NetworkError`, not retried |
    /// | Connection refused | `NetworkError`, not retried |
    /// | Body read failure | `NetworkError`, not retried |
    pub async fn fetch_domain(&self, domain: &str) -> FetchOutcome {
        let url = match build_query_url(&self.endpoint, domain) {
            Ok(url) => url,
            Err(e) => {
                return FetchOutcome::NetworkError {
                    error: format!("Invalid query URL: {}", e),
                }
            }
        };

        tracing::debug!("Querying {}", url);

        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return FetchOutcome::HttpError {
                        status_code: status.as_u16(),
                    };
                }

                match response.text().await {
                    Ok(body) => FetchOutcome::from_body(&body),
                    Err(e) => FetchOutcome::NetworkError {
                        error: classify_error(&e),
                    },
                }
            }
            Err(e) => FetchOutcome::NetworkError {
                error: classify_error(&e),
            },
        }
    }
}

impl ArchiveIndex for CdxClient {
    async fn fetch_urls(&self, domain: &str) -> FetchOutcome {
        self.fetch_domain(domain).await
    }
}

fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
