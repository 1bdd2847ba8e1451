//! Wayback-Fetch main entry point
//!
//! This is the command-line interface for collecting archived URLs.

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wayback_fetch::config::{load_config_with_hash, validate, Config};
use wayback_fetch::output::print_summary;
use wayback_fetch::{run, DomainSource, RunRequest};

/// Wayback-Fetch: archived URL collector
///
/// Fetches every URL the Wayback Machine has archived for one or more
/// domains, in parallel, and saves the deduplicated, sorted list to a file.
#[derive(Parser, Debug)]
#[command(name = "wayback-fetch")]
#[command(version)]
#[command(about = "Fetch Wayback Machine URLs for one or more domains", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["domain", "list"])))]
struct Cli {
    /// Single domain (e.g. example.com)
    #[arg(short, long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// File containing list of domains (one per line)
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// File to save output
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Show fetched URLs live; repeat for more logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum parallel workers (1-10)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// CDX index endpoint to query
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

impl Cli {
    fn domain_source(&self) -> DomainSource {
        match (&self.domain, &self.list) {
            (Some(domain), _) => DomainSource::Single(domain.clone()),
            (None, Some(list)) => DomainSource::List(list.clone()),
            // clap enforces the required group
            (None, None) => DomainSource::Single(String::new()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let request = RunRequest {
        source: cli.domain_source(),
        output_path: cli.output.clone(),
        verbose: cli.verbose > 0,
    };

    // anyhow reports a failed start once, on exit
    let summary = run(&request, &config).await?;

    print_summary(&summary);

    if let Some(error) = &summary.output_error {
        bail!("output was not saved: {}", error);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 | 1 => EnvFilter::new("wayback_fetch=info,warn"),
            2 => EnvFilter::new("wayback_fetch=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.fetcher.max_workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.fetcher.timeout_secs = timeout;
        config.fetcher.connect_timeout_secs = config.fetcher.connect_timeout_secs.min(timeout);
    }
    if let Some(endpoint) = &cli.endpoint {
        config.fetcher.endpoint = endpoint.clone();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}
