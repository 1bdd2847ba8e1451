//! Pool driver - launches the fetch workers and merges their reports
//!
//! Workers share nothing but the domain queue. Each one returns its own
//! `WorkerReport`, and the reports are merged here, sequentially, as the
//! workers are joined. No result is visible before every worker has exited.

use crate::archive::ArchiveIndex;
use crate::pool::queue::DomainQueue;
use crate::pool::worker::{fetch_worker, WorkerContext, WorkerReport};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Hard cap on parallel fetch workers
pub const MAX_WORKERS: usize = 10;

/// Options controlling one pool run
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Requested worker limit, clamped to `1..=MAX_WORKERS`
    pub max_workers: usize,

    /// Echo every fetched URL and per-domain counts to stdout
    pub verbose: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_workers: MAX_WORKERS,
            verbose: false,
        }
    }
}

/// Merged findings of every worker
#[derive(Debug, Default)]
pub struct PoolResults {
    /// Number of workers launched for this run
    pub workers_launched: usize,

    /// Domains fetched (successfully or not)
    pub domains_processed: usize,

    /// Union of all URL records from successful fetches
    pub urls: HashSet<String>,

    /// Domains that yielded nothing or failed, in worker completion order
    pub empty_domains: Vec<String>,

    /// How many entries of `empty_domains` are failures
    pub failed_domains: usize,
}

impl PoolResults {
    fn merge(&mut self, report: WorkerReport) {
        self.domains_processed += report.domains_processed;
        self.urls.extend(report.urls);
        self.empty_domains.extend(report.empty_domains);
        self.failed_domains += report.failed;
    }
}

/// Number of workers to launch for `domain_count` domains
///
/// `min(max_workers, domain_count)` with `max_workers` clamped to
/// `1..=MAX_WORKERS`; zero only when there are no domains.
pub fn worker_count(domain_count: usize, max_workers: usize) -> usize {
    domain_count.min(max_workers.clamp(1, MAX_WORKERS))
}

/// Fetches every domain through `index` with a bounded worker pool
///
/// The queue is fully populated before the first worker starts. The call
/// returns once every worker has observed an empty queue and exited; a
/// failing domain is recorded in `empty_domains` and never stops the run.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use wayback_fetch::config::FetcherConfig;
/// use wayback_fetch::{run_pool, CdxClient, PoolOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CdxClient::new(&FetcherConfig::default())?;
/// let domains = vec!["example.com".to_string()];
/// let results = run_pool(domains, Arc::new(client), &PoolOptions::default()).await;
/// println!("{} unique URLs", results.urls.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_pool<I: ArchiveIndex>(
    domains: Vec<String>,
    index: Arc<I>,
    options: &PoolOptions,
) -> PoolResults {
    let queue = DomainQueue::from_domains(domains);
    let workers = worker_count(queue.len(), options.max_workers);

    let mut results = PoolResults {
        workers_launched: workers,
        ..PoolResults::default()
    };

    if workers == 0 {
        debug!("No domains queued, skipping worker launch");
        return results;
    }

    info!("Launching {} workers for {} domains", workers, queue.len());
    let start_time = Instant::now();

    let mut join_set = JoinSet::new();
    for worker_num in 0..workers {
        join_set.spawn(fetch_worker(WorkerContext {
            worker_num,
            queue: queue.clone(),
            index: Arc::clone(&index),
            verbose: options.verbose,
        }));
    }

    while let Some(outcome) = join_set.join_next().await {
        match outcome {
            Ok(report) => results.merge(report),
            Err(e) => error!("Fetch worker terminated abnormally: {}", e),
        }
    }

    info!(
        "Pool finished: {} domains, {} unique URLs, {} empty in {:?}",
        results.domains_processed,
        results.urls.len(),
        results.empty_domains.len(),
        start_time.elapsed()
    );

    results
}
