//! URL source parsing for delimited input files.
//!
//! The input contract is deliberately loose: a text file whose first line is
//! a header and whose remaining lines each carry one URL in the first
//! comma-delimited field. Anything past the first field is ignored.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading the URL source file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be opened or read.
    #[error("cannot read input URLs from {path}: {source}")]
    Io {
        /// The input file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Reads the URL list from a delimited text file.
///
/// The first line is treated as a header and skipped. Each remaining
/// non-empty line contributes the first comma-delimited field, trimmed.
/// Blank lines are skipped with a warning rather than treated as records.
///
/// No URL syntax validation happens here - a malformed URL is a
/// fetcher-level failure, by design.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be read. This is fatal for
/// the run: without input there is nothing to download.
pub fn read_input_urls(path: &Path) -> Result<Vec<String>, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut urls = Vec::new();
    for (line_number, line) in contents.lines().enumerate() {
        if line_number == 0 {
            continue; // header
        }
        let first_field = line.split(',').next().unwrap_or("").trim();
        if first_field.is_empty() {
            warn!(line = line_number + 1, "skipping line with empty URL field");
            continue;
        }
        urls.push(first_field.to_string());
    }

    debug!(path = %path.display(), urls = urls.len(), "parsed input URLs");
    Ok(urls)
}
