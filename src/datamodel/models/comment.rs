//! Comment model.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{KindTagged, PublicObject};

/// Free-text annotation attached to another object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub public_id: String,
    pub text: String,
}

impl Comment {
    pub fn new(public_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            text: text.into(),
        }
    }
}

impl PublicObject for Comment {
    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn kind(&self) -> Kind {
        Kind::Comment
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl KindTagged for Comment {
    const KIND: Kind = Kind::Comment;
}
