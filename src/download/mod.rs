//! Bounded-concurrency HTTP download engine for image datasets.
//!
//! This module fetches large lists of image URLs with a fixed concurrency
//! ceiling, validates each response, deduplicates on a URL-derived identity,
//! and reports an aggregate success/total summary.
//!
//! # Features
//!
//! - Semaphore-bounded concurrent fetches (default 32 in flight)
//! - Per-request timeout, contained to the affected URL
//! - Response validation (status 200, `image/*` content type)
//! - Idempotent re-runs: already-present targets skip the network entirely
//! - Full per-URL failure isolation - one dead URL never aborts the batch
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

mod client;
pub mod constants;
mod engine;
mod error;
mod identity;

pub use client::{Fetch, HttpClient};
pub use engine::{DEFAULT_CONCURRENCY, DownloadEngine, DownloadOutcome, DownloadSummary, EngineError};
pub use error::DownloadError;
pub use identity::{is_already_present, target_identity};
