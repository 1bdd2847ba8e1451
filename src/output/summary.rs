//! Run summary reporting
//!
//! This module renders the end-of-run summary printed by the CLI.

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one fetch run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time from start to output written
    pub elapsed: Duration,

    /// Number of domains resolved from the input
    pub domains_processed: usize,

    /// Number of workers the pool launched
    pub workers_launched: usize,

    /// Unique URLs in the output file
    pub unique_urls: usize,

    /// Domains that yielded nothing, either empty or failed
    pub empty_domains: Vec<String>,

    /// How many of `empty_domains` failed rather than came back empty
    pub failed_domains: usize,

    /// Destination of the URL list
    pub output_path: PathBuf,

    /// Why the output file could not be written, if it could not
    pub output_error: Option<String>,
}

impl RunSummary {
    /// Whether the URL list reached the output file
    pub fn saved(&self) -> bool {
        self.output_error.is_none()
    }
}

/// Renders the summary block shown at the end of a run
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("\n========= SUMMARY =========\n");
    out.push_str(&format!(
        "Started At        : {}\n",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Domains Processed : {}\n",
        summary.domains_processed
    ));
    out.push_str(&format!("Workers Used      : {}\n", summary.workers_launched));
    out.push_str(&format!("Total URLs Fetched: {}\n", summary.unique_urls));
    out.push_str(&format!(
        "Empty Domains     : {}\n",
        summary.empty_domains.len()
    ));
    out.push_str(&format!(
        "Time Taken        : {:.2} seconds\n",
        summary.elapsed.as_secs_f64()
    ));
    out.push_str("===========================\n");

    if !summary.empty_domains.is_empty() {
        out.push_str(&format!(
            "\nDomains with no URLs ({}, {} failed):\n",
            summary.empty_domains.len(),
            summary.failed_domains
        ));
        for domain in &summary.empty_domains {
            out.push_str(&format!("  - {}\n", domain));
        }
    }

    out
}

/// Writes the summary to `out`
pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> std::io::Result<()> {
    out.write_all(render_summary(summary).as_bytes())?;
    out.flush()
}

/// Prints the summary to stdout
///
/// A closed stdout (e.g. piped into `head`) is ignored rather than fatal.
pub fn print_summary(summary: &RunSummary) {
    let _ = write_summary(&mut std::io::stdout().lock(), summary);
}
