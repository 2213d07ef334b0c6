//! Amplitude model.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

/// A measured waveform amplitude feeding a station magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amplitude {
    pub public_id: String,
    pub value: f64,
    /// Measurement type, e.g. "ML" or "mb".
    pub amplitude_type: String,
    pub unit: Option<String>,
}

impl Amplitude {
    pub fn new(public_id: impl Into<String>, value: f64, amplitude_type: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            value,
            amplitude_type: amplitude_type.into(),
            unit: None,
        }
    }
}

impl PublicObject for Amplitude {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::Amplitude
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for Amplitude {
    const KIND: Kind = Kind::Amplitude;
}
