//! Constants for the download module (timeouts, concurrency).

use std::time::Duration;

/// Default per-request timeout for one image fetch (8 seconds).
///
/// Covers the whole round trip: connect, response, and body read. Expiry is
/// a normal per-URL failure outcome, never a batch abort.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Minimum allowed concurrency value.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 100;
