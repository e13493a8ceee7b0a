//! Error types for the download module.
//!
//! This module defines the closed failure taxonomy for one download attempt,
//! providing context-rich error messages for after-the-fact diagnosis.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading one image.
///
/// Every variant is contained to its own URL's outcome; nothing here ever
/// aborts the surrounding batch.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors,
    /// malformed URLs rejected by the transport, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before the response body completed.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Final response status was not exactly 200.
    ///
    /// Redirects are followed transparently by the transport; this is the
    /// status of the final response.
    #[error("HTTP {status} downloading {url}")]
    BadStatus {
        /// The URL that returned an unacceptable status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response `content-type` did not start with `image/`.
    ///
    /// Guards against HTML error pages or landing pages served with 200 OK.
    #[error("invalid content type {content_type:?} downloading {url}")]
    BadContentType {
        /// The URL that returned a non-image body.
        url: String,
        /// The offending header value ("" when the header is absent).
        content_type: String,
    },

    /// File system error writing the downloaded bytes.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Any failure not matching the taxonomy, caught at the boundary of one
    /// URL's processing so it cannot propagate to siblings.
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Description of what went wrong.
        message: String,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a bad-status error.
    pub fn bad_status(url: impl Into<String>, status: u16) -> Self {
        Self::BadStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a bad-content-type error.
    pub fn bad_content_type(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::BadContentType {
            url: url.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or `From<std::io::Error>`
// because our error variants require context (url, path) that the source errors
// don't provide. The helper constructor methods (network(), io(), etc.) let
// callers supply that context at the error site.
