//! Crate error types.

use thiserror::Error;

/// Failures surfaced to callers.
///
/// The caches absorb every other abnormal condition locally (malformed
/// keys, duplicate submissions, IDs the backend no longer knows during a
/// refresh) - positional record access is the one operation that fails
/// loudly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Positional record access past the end of the store.
    #[error("record position {index} is out of range ({len} records cached)")]
    OutOfRange { index: usize, len: usize },
}
