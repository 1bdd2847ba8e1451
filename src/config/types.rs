use serde::Deserialize;

/// Default CDX index endpoint of the Wayback Machine
pub const DEFAULT_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Main configuration structure for Wayback-Fetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Archive index fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// CDX search endpoint queried for every domain
    pub endpoint: String,

    /// Per-request timeout covering the whole response (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Timeout for establishing the connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on parallel workers; never above the hard cap of 10
    #[serde(rename = "max-workers")]
    pub max_workers: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 10,
            max_workers: crate::pool::MAX_WORKERS,
            user_agent: format!("wayback-fetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
