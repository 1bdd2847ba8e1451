//! Wayback-Fetch: archived URL collector
//!
//! This crate queries the Wayback Machine CDX index for every URL archived
//! under one or more domains, fetching domains in parallel with a bounded
//! worker pool, then deduplicates and sorts the results for output.

pub mod archive;
pub mod config;
pub mod input;
pub mod output;
pub mod pool;
pub mod runner;

use thiserror::Error;

/// Main error type for Wayback-Fetch operations
#[derive(Debug, Error)]
pub enum WaybackError {
    #[error("Domain input error: {0}")]
    Input(#[from] InputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while resolving the list of domains to fetch
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Domain cannot be blank")]
    BlankDomain,

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read domain list {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for Wayback-Fetch operations
pub type Result<T> = std::result::Result<T, WaybackError>;

/// Result type alias for domain input operations
pub type InputResult<T> = std::result::Result<T, InputError>;

// Re-export commonly used types
pub use archive::{ArchiveIndex, CdxClient, FetchOutcome};
pub use config::Config;
pub use input::DomainSource;
pub use output::{finalize_urls, RunSummary};
pub use pool::{run_pool, worker_count, DomainQueue, PoolOptions, PoolResults, MAX_WORKERS};
pub use runner::{run, RunRequest};
