//! Time-series record cache.

use std::fmt;
use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::CacheSettings;
use crate::datamodel::record::{RecordRef, TimeSeriesRecord};
use crate::error::CacheError;

/// In-memory store of time-series record handles, so that stream
/// consumers read here instead of pulling the same window twice.
///
/// Records are kept in feed order. A record is identified by its
/// `(start_time, end_time, stream_id)` window; feeding the same window
/// again is refused, first record wins.
///
/// The cache holds one shared reference per record. [`remove`](Self::remove)
/// and [`clear`](Self::clear) release that share on the spot; records held
/// elsewhere stay alive.
///
/// Not internally synchronized. A producer thread feeding while a reader
/// drains goes through [`SharedRecordCache`](super::SharedRecordCache).
pub struct RecordCache {
    records: Vec<RecordRef>,
    settings: CacheSettings,
    duplicates: usize,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::with_settings(CacheSettings::default())
    }

    pub fn with_settings(settings: CacheSettings) -> Self {
        Self {
            records: Vec::with_capacity(settings.initial_capacity),
            settings,
            duplicates: 0,
        }
    }

    /// Store a record unless its `(start, end, stream)` window is already
    /// present. Duplicates are counted and logged up to the configured
    /// cap, then dropped.
    pub fn feed(&mut self, record: RecordRef) {
        let duplicate = self.records.iter().any(|r| {
            r.start_time() == record.start_time()
                && r.end_time() == record.end_time()
                && r.stream_id() == record.stream_id()
        });
        if duplicate {
            self.note_duplicate(&record);
            return;
        }

        self.records.push(record);
    }

    fn note_duplicate(&mut self, record: &RecordRef) {
        let limit = self.settings.duplicate_log_limit;
        if self.duplicates < limit {
            debug!(
                "Record {} [{} .. {}] already cached, ignored",
                record.stream_id(),
                record.start_time(),
                record.end_time()
            );
        } else if self.duplicates == limit {
            debug!(
                "{} duplicate records reported, further ones will not be logged",
                limit
            );
        }
        self.duplicates += 1;
    }

    /// First record matching the exact window and stream.
    pub fn get(&self, start: DateTime<Utc>, end: DateTime<Utc>, stream_id: &str) -> Option<RecordRef> {
        self.records
            .iter()
            .find(|r| r.start_time() == start && r.end_time() == end && r.stream_id() == stream_id)
            .map(Arc::clone)
    }

    /// First record carrying the given stream ID, whatever its window.
    pub fn get_by_stream(&self, stream_id: &str) -> Option<RecordRef> {
        self.records
            .iter()
            .find(|r| r.stream_id() == stream_id)
            .map(Arc::clone)
    }

    /// Record at `position` in feed order.
    ///
    /// The one loud failure in the crate: positions past the end return
    /// [`CacheError::OutOfRange`].
    pub fn record_at(&self, position: usize) -> Result<RecordRef, CacheError> {
        self.records
            .get(position)
            .cloned()
            .ok_or(CacheError::OutOfRange {
                index: position,
                len: self.records.len(),
            })
    }

    /// Every record on the given stream, in feed order.
    pub fn records_for_stream(&self, stream_id: &str) -> Vec<RecordRef> {
        self.records
            .iter()
            .filter(|r| r.stream_id() == stream_id)
            .map(Arc::clone)
            .collect()
    }

    /// Every record from the given station, in feed order.
    pub fn station_records(&self, network_code: &str, station_code: &str) -> Vec<RecordRef> {
        self.records
            .iter()
            .filter(|r| r.network_code() == network_code && r.station_code() == station_code)
            .map(Arc::clone)
            .collect()
    }

    /// Remove every record matching the exact window and stream,
    /// releasing each handle share on the spot. Returns the number
    /// removed - at most one, given the feed-time uniqueness policy.
    pub fn remove(&mut self, start: DateTime<Utc>, end: DateTime<Utc>, stream_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| {
            !(r.start_time() == start && r.end_time() == end && r.stream_id() == stream_id)
        });
        before - self.records.len()
    }

    /// Drop every record and its handle share.
    pub fn clear(&mut self) {
        debug!("Clearing record cache ({} records)", self.records.len());
        self.records.clear();
    }

    /// Storage footprint of the handles themselves, excluding sample
    /// data. Grows by one handle-size per record, nothing else.
    pub fn byte_size(&self) -> usize {
        self.records.len() * mem::size_of::<RecordRef>()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Duplicate submissions refused since construction.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCache")
            .field("records", &self.records.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}
