//! Cache module - the shared state engine frontend delegates lean on.
//!
//! Two independent, structurally similar stores:
//! - `ObjectCache` - multi-key association cache over domain objects,
//!   queried by own ID, parent ID, or association state
//! - `RecordCache` - time-series record store, queried by window, stream,
//!   station, or position
//!
//! Both keep insertion order, scan linearly, and hold shared handles to
//! data owned jointly with the rest of the application. Neither locks
//! internally; the `Shared*` wrappers carry the external mutex for
//! cross-thread use.

mod object_cache;
mod record_cache;
mod shared;

pub use object_cache::{AssociationState, MultiKey, ObjectCache};
pub use record_cache::RecordCache;
pub use shared::{SharedObjectCache, SharedRecordCache};
