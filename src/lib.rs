//! Temblor - object and record caching for seismic monitoring frontends.
//!
//! Event lists, plotting widgets, and stream viewers all need the same
//! origins, magnitudes, and waveform windows; this crate is the layer
//! that keeps one fetched copy around so they stop asking the backend
//! twice.
//!
//! ## Architecture
//!
//! - `cache` - the two stores: `ObjectCache` (multi-key associations over
//!   domain objects) and `RecordCache` (time-series windows), plus the
//!   `Shared*` mutex wrappers for cross-thread use
//! - `datamodel` - the opaque-object contract: kind tags, `PublicObject`
//!   and record handles, narrowing casts, lightweight models
//! - `query` - the backend seam `update_objects` re-fetches through
//! - `config` - cache tuning from code or environment
//! - `error` - the one loud failure (positional access out of range)
//!
//! Delegates fetch from the database or record stream, feed the caches
//! via [`ObjectCache::add_object`] / [`RecordCache::feed`], and every
//! other component queries the cache instead of re-fetching.

pub mod cache;
pub mod config;
pub mod datamodel;
pub mod error;
pub mod query;

pub use cache::{
    AssociationState, MultiKey, ObjectCache, RecordCache, SharedObjectCache, SharedRecordCache,
};
pub use config::CacheSettings;
pub use error::CacheError;
