//! Shared-access wrappers.
//!
//! The caches carry no locks of their own; whoever uses one across
//! threads serializes access through one external mutex. That is the
//! stream-delegate pattern: a worker thread feeds records while the
//! frontend reads. These wrappers package the mutex so every party locks
//! the same one.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::CacheSettings;
use crate::datamodel::RecordRef;

use super::{ObjectCache, RecordCache};

/// Cheap-to-clone handle to a mutex-guarded [`ObjectCache`].
#[derive(Clone, Default)]
pub struct SharedObjectCache {
    inner: Arc<Mutex<ObjectCache>>,
}

impl SharedObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CacheSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ObjectCache::with_settings(settings))),
        }
    }

    /// Lock the cache for a batch of operations.
    ///
    /// Hold the guard across every read that must see a consistent store;
    /// drop it before anything slow.
    pub fn lock(&self) -> MutexGuard<'_, ObjectCache> {
        self.inner.lock()
    }
}

impl fmt::Debug for SharedObjectCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedObjectCache")
            .field("entries", &self.inner.lock().len())
            .finish()
    }
}

/// Cheap-to-clone handle to a mutex-guarded [`RecordCache`].
#[derive(Clone, Default)]
pub struct SharedRecordCache {
    inner: Arc<Mutex<RecordCache>>,
}

impl SharedRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CacheSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecordCache::with_settings(settings))),
        }
    }

    /// Feed one record under the lock - the producer-side call.
    pub fn feed(&self, record: RecordRef) {
        self.inner.lock().feed(record);
    }

    /// Lock the cache for a batch of operations.
    pub fn lock(&self) -> MutexGuard<'_, RecordCache> {
        self.inner.lock()
    }
}

impl fmt::Debug for SharedRecordCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRecordCache")
            .field("records", &self.inner.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::cache::MultiKey;
    use crate::datamodel::GenericRecord;
    use crate::datamodel::models::Origin;

    #[test]
    fn test_shared_object_cache_clones_see_one_store() {
        let shared = SharedObjectCache::new();
        let clone = shared.clone();

        let time = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
        let origin = Arc::new(Origin::new("origin-1", time, -21.1, 55.5, 12.0));
        shared
            .lock()
            .add_object(MultiKey::self_parented("origin-1"), origin);

        assert_eq!(clone.lock().len(), 1);
        assert!(clone.lock().object_by_own_id("origin-1").is_some());
    }

    #[test]
    fn test_shared_record_cache_feed_from_worker_thread() {
        let shared = SharedRecordCache::new();
        let producer = shared.clone();

        let handle = thread::spawn(move || {
            for minute in 0..8 {
                let start = Utc.with_ymd_and_hms(2024, 5, 17, 8, minute, 0).unwrap();
                let end = Utc.with_ymd_and_hms(2024, 5, 17, 8, minute, 59).unwrap();
                producer.feed(Arc::new(GenericRecord::new(
                    "PF", "RER", "00", "HHZ", start, end,
                )));
            }
        });
        handle.join().unwrap();

        let cache = shared.lock();
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.records_for_stream("PF.RER.00.HHZ").len(), 8);
    }
}
