//! Fetch outcomes and the archive index abstraction
//!
//! A fetch is one request-response cycle against the index for one domain.
//! Failures are values here, not errors: the pool records them and moves on.

use std::future::Future;

/// Result of fetching the archived URLs of one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The index returned at least one URL record
    Found(Vec<String>),

    /// The index answered successfully but listed nothing
    Empty,

    /// The index answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request never produced a usable response (timeout, refused, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Builds an outcome from a successful response body
    pub fn from_body(body: &str) -> Self {
        let records = parse_cdx_body(body);
        if records.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Found(records)
        }
    }

    /// Whether this fetch failed at the transport or protocol level
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FetchOutcome::HttpError { .. } | FetchOutcome::NetworkError { .. }
        )
    }

    /// Number of URL records carried by this outcome
    pub fn record_count(&self) -> usize {
        match self {
            FetchOutcome::Found(records) => records.len(),
            _ => 0,
        }
    }
}

/// A source of archived URLs, queried once per domain
///
/// The pool is generic over this trait; [`crate::archive::CdxClient`] is the
/// HTTP implementation.
pub trait ArchiveIndex: Send + Sync + 'static {
    /// Fetches every archived URL recorded under `domain`
    fn fetch_urls(&self, domain: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Splits a plain-text CDX response into URL records
///
/// One record per line. Blank lines carry no record, so an empty or
/// whitespace-only body yields nothing.
pub fn parse_cdx_body(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
