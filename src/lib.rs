//! Imageset Core Library
//!
//! This library provides the core functionality for the imageset tool,
//! which turns large lists of image URLs into an on-disk image dataset
//! ready for vision-language captioning and editing workflows.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - Bounded-concurrency HTTP download engine
//! - [`input`] - URL source parsing (delimited text files)
//! - [`logging`] - File-backed tracing sink with an explicit lifecycle
//! - [`pipeline`] - Interfaces for the captioning and editing collaborators

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod input;
pub mod logging;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadOutcome, DownloadSummary,
    EngineError, Fetch, HttpClient, is_already_present, target_identity,
};
pub use input::{InputError, read_input_urls};
