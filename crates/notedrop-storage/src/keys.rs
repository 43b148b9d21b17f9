//! Key, URL, and unique-name construction.
//!
//! All pure functions over a settings snapshot plus a caller-supplied
//! instant, so callers and tests control the clock.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Datelike, Utc};
use notedrop_core::Settings;

/// Build the object key for an upload.
///
/// The prefix is normalized to end in `/` (an empty prefix stays empty).
/// With `use_year`, the four-digit year of `at` is inserted as a
/// subdirectory directly after the prefix. The filename is appended as-is.
pub fn object_key(prefix: &str, filename: &str, use_year: bool, at: DateTime<Utc>) -> String {
    let mut key = String::new();
    let prefix = prefix.trim();
    if !prefix.is_empty() {
        key.push_str(prefix);
        if !key.ends_with('/') {
            key.push('/');
        }
    }
    if use_year {
        key.push_str(&format!("{:04}/", at.year()));
    }
    key.push_str(filename);
    key
}

/// Public URL for a stored object.
///
/// A configured custom domain wins outright: `{domain}/{key}`. Otherwise
/// the URL is virtual-hosted-style, with the bucket prepended as a
/// subdomain of the endpoint host: `https://{bucket}.{host}/{key}`.
pub fn public_url(settings: &Settings, key: &str) -> String {
    let domain = settings.custom_domain.trim();
    if !domain.is_empty() {
        return format!("{}/{}", domain.trim_end_matches('/'), key);
    }

    let host = settings
        .endpoint
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    format!("https://{}.{}/{}", settings.bucket_name, host, key)
}

/// Rename a captured file to `{millis}.{ext}`.
///
/// The "extension" is the last dot-separated segment of the original name;
/// a name without a dot contributes its whole stem. The original name is
/// never preserved in the stored key.
pub fn unique_file_name(original: &str, at_millis: i64) -> String {
    let ext = original.rsplit('.').next().unwrap_or(original);
    format!("{}.{}", at_millis, ext)
}

/// Monotonically non-decreasing millisecond source.
///
/// Successive calls return strictly increasing values even when the wall
/// clock hands out the same millisecond twice, so two files dispatched in
/// one batch never share a generated name. Collisions across processes are
/// accepted, not prevented.
pub struct NameSequence {
    last_millis: AtomicI64,
}

impl NameSequence {
    pub fn new() -> Self {
        NameSequence {
            last_millis: AtomicI64::new(0),
        }
    }

    /// The current clock reading, clamped above every previous return value.
    pub fn next_millis(&self, now_millis: i64) -> i64 {
        let prev = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            })
            .unwrap_or(now_millis);
        now_millis.max(prev + 1)
    }

    /// Convenience over the real clock.
    pub fn stamp(&self) -> i64 {
        self.next_millis(Utc::now().timestamp_millis())
    }
}

impl Default for NameSequence {
    fn default() -> Self {
        Self::new()
    }
}
