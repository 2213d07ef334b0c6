//! Network magnitude model.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

/// A network-averaged magnitude attached to an origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Magnitude {
    pub public_id: String,
    pub value: f64,
    /// Scale, e.g. "MLv" or "Mw".
    pub magnitude_type: String,
    /// Stations contributing to the average.
    pub station_count: Option<u32>,
}

impl Magnitude {
    pub fn new(public_id: impl Into<String>, value: f64, magnitude_type: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            value,
            magnitude_type: magnitude_type.into(),
            station_count: None,
        }
    }
}

impl PublicObject for Magnitude {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::Magnitude
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for Magnitude {
    const KIND: Kind = Kind::Magnitude;
}
