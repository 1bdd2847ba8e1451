//! Configuration module for Wayback-Fetch
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so the tool runs without one.
//!
//! # Example
//!
//! ```no_run
//! use wayback_fetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wayback-fetch.toml")).unwrap();
//! println!("Fetching with up to {} workers", config.fetcher.max_workers);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, FetcherConfig, DEFAULT_ENDPOINT};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
