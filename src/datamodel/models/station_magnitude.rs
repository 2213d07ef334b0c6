//! Station magnitude model.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

/// A single-station magnitude estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationMagnitude {
    pub public_id: String,
    pub value: f64,
    pub magnitude_type: String,
    /// Stream the estimate was measured on (`NET.STA.LOC.CHA`).
    pub waveform_stream_id: Option<String>,
}

impl StationMagnitude {
    pub fn new(public_id: impl Into<String>, value: f64, magnitude_type: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            value,
            magnitude_type: magnitude_type.into(),
            waveform_stream_id: None,
        }
    }
}

impl PublicObject for StationMagnitude {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::StationMagnitude
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for StationMagnitude {
    const KIND: Kind = Kind::StationMagnitude;
}
