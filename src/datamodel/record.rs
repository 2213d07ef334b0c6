//! Time-series record handles.
//!
//! A record is a chunk of waveform data identified by its stream and time
//! window. The cache never looks at samples, only at the window and the
//! stream routing codes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contract a record must satisfy to be cached.
pub trait TimeSeriesRecord: std::fmt::Debug + Send + Sync {
    fn start_time(&self) -> DateTime<Utc>;

    fn end_time(&self) -> DateTime<Utc>;

    /// Full stream identifier (`NET.STA.LOC.CHA`).
    fn stream_id(&self) -> &str;

    fn network_code(&self) -> &str;

    fn station_code(&self) -> &str;
}

/// Shared handle to a cached record.
pub type RecordRef = Arc<dyn TimeSeriesRecord>;

/// Plain record implementation, the form record-stream producers hand over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericRecord {
    network_code: String,
    station_code: String,
    location_code: String,
    channel_code: String,
    /// Assembled once at construction, `NET.STA.LOC.CHA`.
    stream_id: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    /// Raw samples for the window. May be empty when only the index
    /// information travels.
    pub samples: Vec<f64>,
}

impl GenericRecord {
    pub fn new(
        network_code: impl Into<String>,
        station_code: impl Into<String>,
        location_code: impl Into<String>,
        channel_code: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let network_code = network_code.into();
        let station_code = station_code.into();
        let location_code = location_code.into();
        let channel_code = channel_code.into();
        let stream_id = format!("{network_code}.{station_code}.{location_code}.{channel_code}");

        Self {
            network_code,
            station_code,
            location_code,
            channel_code,
            stream_id,
            start_time,
            end_time,
            samples: Vec::new(),
        }
    }

    /// Attach sample data (builder pattern).
    #[must_use]
    pub fn with_samples(mut self, samples: Vec<f64>) -> Self {
        self.samples = samples;
        self
    }

    pub fn location_code(&self) -> &str {
        &self.location_code
    }

    pub fn channel_code(&self) -> &str {
        &self.channel_code
    }
}

impl TimeSeriesRecord for GenericRecord {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn stream_id(&self) -> &str {
        &self.stream_id
    }

    fn network_code(&self) -> &str {
        &self.network_code
    }

    fn station_code(&self) -> &str {
        &self.station_code
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_stream_id_assembly() {
        let start = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 17, 8, 31, 0).unwrap();
        let rec = GenericRecord::new("PF", "RER", "00", "HHZ", start, end);

        assert_eq!(rec.stream_id(), "PF.RER.00.HHZ");
        assert_eq!(rec.network_code(), "PF");
        assert_eq!(rec.station_code(), "RER");
        assert_eq!(rec.location_code(), "00");
        assert_eq!(rec.channel_code(), "HHZ");
    }

    #[test]
    fn test_with_samples() {
        let start = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 17, 8, 31, 0).unwrap();
        let rec = GenericRecord::new("PF", "RER", "00", "HHZ", start, end)
            .with_samples(vec![0.1, -0.2, 0.3]);

        assert_eq!(rec.samples.len(), 3);
        assert_eq!(rec.start_time(), start);
        assert_eq!(rec.end_time(), end);
    }
}
