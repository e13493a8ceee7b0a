//! Target identity derivation and the existence gate.
//!
//! A target identity is the deterministic on-disk filename for a URL:
//! `hex(sha1(url))` plus the lowercased extension of the final path segment.
//! Identity doubles as the idempotency key - the presence of
//! `{output_dir}/{identity}` is the only durable state between runs.

use std::path::Path;

use sha1::{Digest, Sha1};
use url::Url;

/// Derives the stable file identity for a URL.
///
/// The identity is `hex(sha1(url)) + "." + lowercase(extension_of(url))`.
/// This is a pure function with no failure mode: a malformed URL still
/// produces an identity, and a final path segment without a `.` yields an
/// empty extension (rendering as a trailing dot, which is accepted).
///
/// URLs differing only in query parameters share path and extension and so
/// hash to distinct identities (the full URL string is hashed), but two
/// literally identical URLs always collide - that is the deduplication
/// contract. This is a URL hash, not a content hash: deduplication happens
/// before any network call.
///
/// # Example
///
/// ```
/// use imageset_core::download::target_identity;
///
/// let a = target_identity("https://example.com/cat.JPG");
/// let b = target_identity("https://example.com/cat.JPG");
/// assert_eq!(a, b);
/// assert!(a.ends_with(".jpg"));
/// ```
#[must_use]
pub fn target_identity(url: &str) -> String {
    let digest = Sha1::digest(url.as_bytes());
    format!("{}.{}", hex::encode(digest), extension_of(url))
}

/// Extracts the lowercased extension of the final path segment, ignoring any
/// query string. Returns an empty string when the segment has no `.`.
fn extension_of(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        let last_segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("");
        return last_segment
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
    }

    // Unparseable input still needs an identity: fall back to raw string
    // slicing (strip the query, take the last path-ish segment).
    let path = url.split('?').next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Checks whether a target identity already exists in the output directory.
///
/// This is a direct check against the store, re-run per URL with no caching
/// layer. A previously downloaded target is reported as trivially successful
/// without a network call, making re-runs idempotent and cheap.
pub async fn is_already_present(output_dir: &Path, identity: &str) -> bool {
    tokio::fs::try_exists(output_dir.join(identity))
        .await
        .unwrap_or(false)
}
