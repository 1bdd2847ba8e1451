//! Domain input resolution
//!
//! Turns the user's selection (one domain, or a newline-delimited list file)
//! into the ordered list of domains that will be queued for fetching.
//! Domains are trimmed but otherwise taken as given.

use crate::{InputError, InputResult};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where the domains to fetch come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource {
    /// A single domain given on the command line
    Single(String),

    /// A file containing one domain per line
    List(PathBuf),
}

impl DomainSource {
    /// Resolves this source into an ordered list of domains
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - The domains, in input order, blank entries removed
    /// * `Err(InputError)` - The single domain is blank, or the list file is
    ///   missing or unreadable
    pub fn resolve(&self) -> InputResult<Vec<String>> {
        match self {
            DomainSource::Single(domain) => {
                let domain = domain.trim();
                if domain.is_empty() {
                    return Err(InputError::BlankDomain);
                }
                Ok(vec![domain.to_string()])
            }
            DomainSource::List(path) => read_domain_list(path),
        }
    }
}

/// Reads a domain list file, one domain per line
pub fn read_domain_list(path: &std::path::Path) -> InputResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        let path = path.display().to_string();
        if source.kind() == ErrorKind::NotFound {
            InputError::NotFound { path }
        } else {
            InputError::Read { path, source }
        }
    })?;

    Ok(parse_domain_lines(&content))
}

/// Splits text into trimmed, non-blank domain entries
pub fn parse_domain_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
