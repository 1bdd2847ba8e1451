//! Run orchestration - one complete fetch from domain input to output file
//!
//! The sequence is strictly:
//! 1. Resolve the domain list (fatal errors stop here, before any fetching
//!    and before the output file is touched)
//! 2. Build the CDX client
//! 3. Run the worker pool to completion
//! 4. Deduplicate and sort the merged URLs
//! 5. Write the output file
//!
//! Every run builds its own queue, client and results, so consecutive runs
//! in one process share no state.

use crate::archive::CdxClient;
use crate::config::Config;
use crate::input::DomainSource;
use crate::output::{finalize_urls, write_url_file, RunSummary};
use crate::pool::{run_pool, PoolOptions};
use crate::WaybackError;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// What to fetch and where to put it
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Where the domains come from
    pub source: DomainSource,

    /// File receiving the sorted URL list
    pub output_path: PathBuf,

    /// Echo fetched URLs and per-domain counts while running
    pub verbose: bool,
}

/// Runs a complete fetch
///
/// # Returns
///
/// * `Ok(RunSummary)` - Fetching completed. If the output file could not be
///   written, `output_error` says why; the fetched URLs are not retained.
/// * `Err(WaybackError)` - The run could not start (blank domain, domain
///   list missing, HTTP client could not be built)
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use wayback_fetch::{run, Config, DomainSource, RunRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = RunRequest {
///     source: DomainSource::Single("example.com".to_string()),
///     output_path: PathBuf::from("urls.txt"),
///     verbose: false,
/// };
/// let summary = run(&request, &Config::default()).await?;
/// println!("{} unique URLs", summary.unique_urls);
/// # Ok(())
/// # }
/// ```
pub async fn run(request: &RunRequest, config: &Config) -> Result<RunSummary, WaybackError> {
    let started_at = Utc::now();
    let start_time = Instant::now();

    let domains = request.source.resolve()?;
    tracing::info!(
        "Starting Wayback Fetcher for {} domain(s)...",
        domains.len()
    );

    let client = CdxClient::new(&config.fetcher)?;
    tracing::debug!("Using CDX endpoint {}", client.endpoint());

    let domain_count = domains.len();
    let options = PoolOptions {
        max_workers: config.fetcher.max_workers,
        verbose: request.verbose,
    };
    let results = run_pool(domains, Arc::new(client), &options).await;

    let urls = finalize_urls(results.urls);

    let output_error = match write_url_file(&request.output_path, &urls) {
        Ok(()) => {
            tracing::info!(
                "Saved {} unique URLs to {}",
                urls.len(),
                request.output_path.display()
            );
            None
        }
        Err(e) => {
            tracing::error!("{}", e);
            Some(e.to_string())
        }
    };

    Ok(RunSummary {
        started_at,
        elapsed: start_time.elapsed(),
        domains_processed: domain_count,
        workers_launched: results.workers_launched,
        unique_urls: urls.len(),
        empty_domains: results.empty_domains,
        failed_domains: results.failed_domains,
        output_path: request.output_path.clone(),
        output_error,
    })
}
