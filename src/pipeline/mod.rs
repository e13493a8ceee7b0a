//! Interfaces to the ML pipeline steps surrounding the downloader.
//!
//! Captioning and image editing are external collaborators: each is a model
//! invoked once per downloaded file in a sequential loop, with per-item
//! failures contained and counted. The model inference itself lives behind
//! narrow traits so these loops stay testable without any ML dependency.

mod caption;
mod edit;

pub use caption::{CaptionModel, CaptionRecord, caption_directory};
pub use edit::{ImageEditModel, edit_directory, edited_file_name};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the pipeline batch loops.
///
/// Per-image model failures are contained inside the loops; these variants
/// cover the loop's own I/O (listing inputs, writing outputs).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File system error reading inputs or writing results.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A result record could not be serialized.
    #[error("cannot serialize caption record: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Lists the files (not subdirectories) of an input directory.
pub(crate) async fn list_input_files(
    input_dir: &std::path::Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut entries = tokio::fs::read_dir(input_dir)
        .await
        .map_err(|e| PipelineError::io(input_dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PipelineError::io(input_dir, e))?
    {
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    // Deterministic processing order regardless of directory enumeration.
    files.sort();
    Ok(files)
}
