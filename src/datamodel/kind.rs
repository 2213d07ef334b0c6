//! Runtime kind tags for cached domain objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag carried by every cached domain object.
///
/// The cache never interprets an object beyond its identity; the tag is
/// what typed lookups compare before narrowing a handle, and what backend
/// queries receive to know which table to hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Origin,
    Event,
    Magnitude,
    Amplitude,
    Comment,
    StationMagnitude,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "Origin",
            Self::Event => "Event",
            Self::Magnitude => "Magnitude",
            Self::Amplitude => "Amplitude",
            Self::Comment => "Comment",
            Self::StationMagnitude => "StationMagnitude",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
