//! In-memory object source.

use std::collections::HashMap;
use std::sync::Arc;

use crate::datamodel::kind::Kind;
use crate::datamodel::object::{PublicObject, PublicObjectRef};

use super::ObjectQuery;

/// [`ObjectQuery`] backed by a plain map.
///
/// Serves as the reference implementation of the query contract and as a
/// stand-in backend in tests.
#[derive(Default)]
pub struct MemoryObjectQuery {
    objects: HashMap<(Kind, String), PublicObjectRef>,
}

impl MemoryObjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object under its own kind and public ID. A later
    /// insert with the same identity replaces the earlier one.
    pub fn insert<T: PublicObject>(&mut self, object: Arc<T>) {
        let key = (object.kind(), object.public_id().to_string());
        self.objects.insert(key, object);
    }

    /// Forget an object. Returns the handle if it was known.
    pub fn remove(&mut self, kind: Kind, public_id: &str) -> Option<PublicObjectRef> {
        self.objects.remove(&(kind, public_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectQuery for MemoryObjectQuery {
    fn object(&self, kind: Kind, public_id: &str) -> Option<PublicObjectRef> {
        self.objects.get(&(kind, public_id.to_string())).cloned()
    }
}
