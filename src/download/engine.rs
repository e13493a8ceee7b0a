//! Download orchestrator for bounded-concurrency image batches.
//!
//! This module provides the `DownloadEngine` which fans a URL list out
//! across a semaphore-based admission gate, drives the existence gate,
//! fetcher and persistence per URL, and folds the per-URL outcomes into an
//! aggregate summary.
//!
//! # Overview
//!
//! Every URL is processed in its own Tokio task. The semaphore caps how many
//! fetches are in flight at once; the existence gate runs before admission so
//! an idempotent re-run never waits on a slot or touches the network.
//!
//! # Example
//!
//! ```no_run
//! use imageset_core::download::{DownloadEngine, HttpClient};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(32)?;
//! let client = Arc::new(HttpClient::new());
//! let urls = vec!["https://example.com/cat.jpg".to_string()];
//! let summary = engine.run(&urls, client, Path::new("./images")).await?;
//! println!("Successfully downloaded {}/{} images", summary.succeeded(), summary.total());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};

use super::client::Fetch;
use super::constants::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use super::error::DownloadError;
use super::identity::{is_already_present, target_identity};

/// Default number of simultaneous in-flight fetches.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Error type for download engine operations.
///
/// Individual download failures are never surfaced here - they are contained
/// to their URL's outcome. Only whole-run preconditions can fail.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The output directory could not be created. Fatal for the run: there
    /// is no point fetching anything without a destination.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Terminal classification of one URL's download attempt.
///
/// Outcomes are run-scoped: they exist only to compute the aggregate summary
/// and are never persisted.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The target identity was already on disk; no network call was made.
    Skipped {
        /// The identity that was found present.
        identity: String,
    },
    /// The image was fetched, validated, and written.
    Success {
        /// The identity the bytes were written under.
        identity: String,
        /// Number of body bytes written.
        bytes_written: u64,
    },
    /// The attempt failed; the error is fully contained to this URL.
    Failed {
        /// The classified failure.
        error: DownloadError,
    },
}

impl DownloadOutcome {
    /// Returns true for outcomes that count towards the succeeded tally
    /// (`Skipped` counts as success).
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Aggregate tally for one orchestrator run.
///
/// An order-independent fold over the per-URL outcomes: `Skipped` and
/// `Success` both count as succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    succeeded: usize,
    total: usize,
}

impl DownloadSummary {
    /// Returns the number of URLs that resolved to `Success` or `Skipped`.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Returns the total number of URLs processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of URLs that resolved to `Failed`.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

/// Download orchestrator with semaphore-bounded concurrency.
///
/// # Concurrency Model
///
/// - Each URL runs in its own Tokio task
/// - The existence gate runs before admission (skips need no slot)
/// - A semaphore permit is held only for the network round trip and released
///   before the disk write, to maximize socket utilization
/// - At most `concurrency` fetches are in flight at any instant, regardless
///   of how many URLs the batch contains
///
/// # Failure Model
///
/// - Every per-URL failure (network, timeout, bad response, write error,
///   task panic) becomes a `Failed` outcome for that URL only
/// - No ordering guarantee across URLs; the summary is a commutative fold
/// - There is no retry: one attempt, one outcome, by design
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
    /// Whether to render a progress bar while the batch runs.
    show_progress: bool,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use imageset_core::download::DownloadEngine;
    ///
    /// let engine = DownloadEngine::new(32).unwrap();
    /// assert_eq!(engine.concurrency(), 32);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            show_progress: false,
        })
    }

    /// Enables a terminal progress bar for the batch (off by default, so
    /// library and test use stays silent).
    #[must_use]
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every URL in the list concurrently and returns the summary.
    ///
    /// This method:
    /// 1. Ensures `output_dir` exists (creation failure is fatal)
    /// 2. Spawns one task per URL, each gated by the semaphore
    /// 3. Waits for every URL to resolve to an outcome
    /// 4. Folds outcomes into `(succeeded, total)`
    ///
    /// Duplicate URLs are legal: they share a target identity, so the
    /// existence gate deduplicates them on disk (the race where two identical
    /// URLs fetch concurrently resolves last-writer-wins to the same path).
    ///
    /// An empty URL list yields `(0, 0)` with no error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutputDir`] if the output directory cannot be
    /// created. Individual download failures do NOT cause this method to
    /// error; they are logged and counted in the summary.
    #[instrument(skip(self, urls, fetcher), fields(urls = urls.len(), output_dir = %output_dir.display()))]
    pub async fn run(
        &self,
        urls: &[String],
        fetcher: Arc<dyn Fetch>,
        output_dir: &Path,
    ) -> Result<DownloadSummary, EngineError> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| EngineError::OutputDir {
                path: output_dir.to_path_buf(),
                source: e,
            })?;

        info!(urls = urls.len(), "starting download batch");

        let mut handles = Vec::with_capacity(urls.len());
        for url in urls {
            let fetcher = Arc::clone(&fetcher);
            let semaphore = Arc::clone(&self.semaphore);
            let url = url.clone();
            let output_dir = output_dir.to_path_buf();

            handles.push(tokio::spawn(download_one(
                fetcher, semaphore, url, output_dir,
            )));
        }

        let progress = if self.show_progress {
            ProgressBar::new(handles.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        // One independent result slot per URL: each task's outcome comes back
        // through its JoinHandle, so no shared accumulator can be corrupted.
        let total = handles.len();
        let mut succeeded = 0usize;
        for handle in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "download task panicked");
                    DownloadOutcome::Failed {
                        error: DownloadError::unexpected(e.to_string()),
                    }
                }
            };
            if outcome.is_success() {
                succeeded += 1;
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(succeeded, total, "download batch complete");

        Ok(DownloadSummary { succeeded, total })
    }
}

/// Resolves one URL to its terminal outcome.
///
/// Step order is fixed: identity, existence gate, slot acquisition, fetch,
/// slot release, write. Suspension at the gate, the fetch, or the write never
/// blocks any sibling task's progress.
async fn download_one(
    fetcher: Arc<dyn Fetch>,
    semaphore: Arc<Semaphore>,
    url: String,
    output_dir: PathBuf,
) -> DownloadOutcome {
    let identity = target_identity(&url);

    if is_already_present(&output_dir, &identity).await {
        info!(url = %url, identity = %identity, "image already present, skipping");
        return DownloadOutcome::Skipped { identity };
    }

    let permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            // The semaphore lives as long as the engine, so this is
            // unreachable in practice; contain it like any other failure.
            error!(url = %url, error = %e, "admission gate closed");
            return DownloadOutcome::Failed {
                error: DownloadError::unexpected(e.to_string()),
            };
        }
    };

    let fetched = fetcher.fetch(&url).await;
    // The slot covers only the network round trip, not the disk write.
    drop(permit);

    let body = match fetched {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %url, error = %e, "failed to download image");
            return DownloadOutcome::Failed { error: e };
        }
    };

    let target = output_dir.join(&identity);
    match tokio::fs::write(&target, &body).await {
        Ok(()) => {
            info!(url = %url, path = %target.display(), bytes = body.len(), "downloaded image");
            DownloadOutcome::Success {
                identity,
                bytes_written: body.len() as u64,
            }
        }
        Err(e) => {
            warn!(url = %url, path = %target.display(), error = %e, "failed to write image");
            DownloadOutcome::Failed {
                error: DownloadError::io(target, e),
            }
        }
    }
}
