//! Backend query seam.
//!
//! [`ObjectCache::update_objects`](crate::ObjectCache::update_objects) is
//! the one cache operation that leaves the process; it goes through this
//! trait. Database adapters implement it outside the crate;
//! [`MemoryObjectQuery`] is the in-crate reference implementation.

mod memory;

pub use memory::MemoryObjectQuery;

use crate::datamodel::kind::Kind;
use crate::datamodel::object::PublicObjectRef;

/// A source the cache can re-fetch objects from.
///
/// Implementations are typically database-bound and may be slow; the
/// cache calls them once per entry during a refresh, with no retries.
pub trait ObjectQuery {
    /// Fetch the object with the given public ID, or `None` when the
    /// backend does not know it.
    fn object(&self, kind: Kind, public_id: &str) -> Option<PublicObjectRef>;
}
