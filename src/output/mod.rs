//! Output module for the fetched URL list and run summary
//!
//! This module handles:
//! - Deduplicating and sorting the merged URL records
//! - Writing the URL list file
//! - Rendering the end-of-run summary

mod summary;
mod writer;

pub use summary::{print_summary, render_summary, RunSummary};
pub use writer::{finalize_urls, write_url_file};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Could not write to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
