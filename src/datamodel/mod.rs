//! Datamodel seam - the contract between the caches and the domain.
//!
//! The caches never interpret what they store. Everything they need from
//! an object is here:
//! - `Kind` - runtime kind tag
//! - `PublicObject` / `PublicObjectRef` - identity-bearing shared handle
//! - `KindTagged` + `downcast` - kind-narrowing cast for typed lookups
//! - `TimeSeriesRecord` / `RecordRef` - the record contract
//! - `models` - lightweight concrete types, one per kind

pub mod kind;
pub mod models;
pub mod object;
pub mod record;

pub use kind::Kind;
pub use object::{KindTagged, PublicObject, PublicObjectRef, downcast};
pub use record::{GenericRecord, RecordRef, TimeSeriesRecord};
