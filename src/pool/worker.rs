use crate::archive::{ArchiveIndex, FetchOutcome};
use crate::pool::queue::DomainQueue;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, error, info};

pub(crate) struct WorkerContext<I> {
    pub(crate) worker_num: usize,
    pub(crate) queue: DomainQueue,
    pub(crate) index: Arc<I>,
    pub(crate) verbose: bool,
}

/// Everything one worker found, handed back to the pool when it exits
#[derive(Debug, Default)]
pub struct WorkerReport {
    /// Domains this worker dequeued and fetched
    pub domains_processed: usize,

    /// URL records from successful fetches, duplicates included
    pub urls: Vec<String>,

    /// Domains that yielded no records, whether empty or failed
    pub empty_domains: Vec<String>,

    /// How many of `empty_domains` failed rather than came back empty
    pub failed: usize,
}

impl WorkerReport {
    fn record(&mut self, domain: String, outcome: FetchOutcome) {
        self.domains_processed += 1;
        if outcome.is_failure() {
            self.failed += 1;
        }
        match outcome {
            FetchOutcome::Found(urls) => self.urls.extend(urls),
            _ => self.empty_domains.push(domain),
        }
    }
}

/// Drains the queue, fetching each domain once, until it reports empty
pub(crate) async fn fetch_worker<I: ArchiveIndex>(ctx: WorkerContext<I>) -> WorkerReport {
    debug!("Beginning worker {}", ctx.worker_num);
    let mut report = WorkerReport::default();

    while let Some(domain) = ctx.queue.try_dequeue() {
        info!("Fetching URLs for: {}", domain);
        let outcome = ctx.index.fetch_urls(&domain).await;

        match &outcome {
            FetchOutcome::HttpError { status_code } => {
                error!(domain = %domain, "Error fetching for {}: HTTP {}", domain, status_code);
            }
            FetchOutcome::NetworkError { error } => {
                error!(domain = %domain, "Error fetching for {}: {}", domain, error);
            }
            _ => {
                debug!("{} URLs found for {}", outcome.record_count(), domain);
                if ctx.verbose {
                    echo_domain_block(&domain, &outcome);
                }
            }
        }

        report.record(domain, outcome);
    }

    debug!(
        "Worker {} exiting after {} domains",
        ctx.worker_num, report.domains_processed
    );
    report
}

/// Writes the verbose block for one domain: every URL then a count line,
/// or a single notice when nothing was found. Failures write nothing.
pub(crate) fn write_domain_block<W: Write>(
    out: &mut W,
    domain: &str,
    outcome: &FetchOutcome,
) -> std::io::Result<()> {
    match outcome {
        FetchOutcome::Found(urls) => {
            for url in urls {
                writeln!(out, "{}", url)?;
            }
            writeln!(out, "[+] {} URLs found for {}", urls.len(), domain)
        }
        FetchOutcome::Empty => writeln!(out, "[-] No URLs found for {}", domain),
        FetchOutcome::HttpError { .. } | FetchOutcome::NetworkError { .. } => Ok(()),
    }
}

/// Emits a domain's block while holding the stdout lock
fn echo_domain_block(domain: &str, outcome: &FetchOutcome) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    // a closed stdout (e.g. piped into `head`) must not stop the fetch
    let _ = write_domain_block(&mut out, domain, outcome);
}
