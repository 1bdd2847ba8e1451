//! Archive index access
//!
//! This module contains everything needed to ask the Wayback Machine CDX
//! index which URLs it has archived under a domain:
//! - The `ArchiveIndex` seam the worker pool fetches through
//! - The reqwest-backed `CdxClient`
//! - Parsing of the plain-text response into URL records

mod client;
mod fetch;

pub use client::{build_http_client, build_query_url, CdxClient};
pub use fetch::{parse_cdx_body, ArchiveIndex, FetchOutcome};
