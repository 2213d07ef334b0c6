//! Cache tuning configuration.
//!
//! Loads from environment variables or is built in code.

use std::env;

/// How many duplicate-insert reports are logged before suppression.
const DEFAULT_DUPLICATE_LOG_LIMIT: usize = 4;

/// Tuning knobs shared by [`ObjectCache`](crate::ObjectCache) and
/// [`RecordCache`](crate::RecordCache).
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Duplicate-insert reports logged before further ones are silenced
    /// for the cache instance.
    pub duplicate_log_limit: usize,

    /// Entry slots reserved up front. Zero means grow on demand.
    pub initial_capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            duplicate_log_limit: DEFAULT_DUPLICATE_LOG_LIMIT,
            initial_capacity: 0,
        }
    }
}

impl CacheSettings {
    /// Set the duplicate-log cap (builder pattern).
    #[must_use]
    pub fn duplicate_log_limit(mut self, limit: usize) -> Self {
        self.duplicate_log_limit = limit;
        self
    }

    /// Reserve entry slots up front (builder pattern).
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Load settings from environment variables.
    ///
    /// Recognized variables: `TEMBLOR_DUPLICATE_LOG_LIMIT`,
    /// `TEMBLOR_INITIAL_CAPACITY`. Missing or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let duplicate_log_limit = env::var("TEMBLOR_DUPLICATE_LOG_LIMIT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.duplicate_log_limit);

        let initial_capacity = env::var("TEMBLOR_INITIAL_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.initial_capacity);

        Self {
            duplicate_log_limit,
            initial_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CacheSettings::default();
        assert_eq!(settings.duplicate_log_limit, 4);
        assert_eq!(settings.initial_capacity, 0);
    }

    #[test]
    fn test_builder() {
        let settings = CacheSettings::default()
            .duplicate_log_limit(2)
            .initial_capacity(128);
        assert_eq!(settings.duplicate_log_limit, 2);
        assert_eq!(settings.initial_capacity, 128);
    }
}
