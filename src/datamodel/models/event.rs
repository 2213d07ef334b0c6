//! Event model.
//!
//! The top-level grouping object: an event collects the origins and
//! magnitudes that describe one earthquake.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub public_id: String,
    /// ID of the origin currently considered authoritative.
    pub preferred_origin_id: Option<String>,
    /// Classification, e.g. "earthquake" or "quarry blast".
    pub event_type: Option<String>,
}

impl Event {
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            preferred_origin_id: None,
            event_type: None,
        }
    }

    #[must_use]
    pub fn with_preferred_origin(mut self, origin_id: impl Into<String>) -> Self {
        self.preferred_origin_id = Some(origin_id.into());
        self
    }
}

impl PublicObject for Event {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::Event
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for Event {
    const KIND: Kind = Kind::Event;
}
