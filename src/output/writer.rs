//! Result finalization and the URL output file

use crate::output::{OutputError, OutputResult};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Deduplicates and sorts URL records
///
/// Equality is exact string equality; ordering is lexicographic. Running it
/// on its own output returns the same list.
pub fn finalize_urls<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    urls.into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Writes one URL per line, newline-terminated, replacing any existing file
///
/// An empty list produces an empty file.
pub fn write_url_file(path: &Path, urls: &[String]) -> OutputResult<()> {
    let to_write_error = |source: std::io::Error| OutputError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    for url in urls {
        writer.write_all(url.as_bytes()).map_err(to_write_error)?;
        writer.write_all(b"\n").map_err(to_write_error)?;
    }
    writer.flush().map_err(to_write_error)?;

    tracing::debug!("Wrote {} URLs to {}", urls.len(), path.display());
    Ok(())
}
