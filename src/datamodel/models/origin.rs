//! Origin model.
//!
//! A located hypocenter solution: where and when the ground moved.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

/// A hypocenter solution produced by a locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Origin {
    pub public_id: String,
    /// Origin time (when the rupture started).
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Depth below surface in kilometers.
    pub depth_km: f64,
}

impl Origin {
    pub fn new(
        public_id: impl Into<String>,
        time: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        depth_km: f64,
    ) -> Self {
        Self {
            public_id: public_id.into(),
            time,
            latitude,
            longitude,
            depth_km,
        }
    }
}

impl PublicObject for Origin {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::Origin
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for Origin {
    const KIND: Kind = Kind::Origin;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let time = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
        let origin = Origin::new("Origin/20240517083000.12", time, -21.24, 55.71, 12.0);

        let json = serde_json::to_string(&origin).unwrap();
        let back: Origin = serde_json::from_str(&json).unwrap();
        assert_eq!(back.public_id, origin.public_id);
        assert_eq!(back.time, origin.time);
        assert_eq!(back.depth_km, origin.depth_km);
    }
}
