//! The shape cached domain objects expose to the cache.
//!
//! The cache treats objects as opaque: identity, a kind tag, and a
//! narrowing cast are the whole contract. Concrete types live in
//! [`models`](super::models) and in consuming crates.

use std::any::Any;
use std::sync::Arc;

use super::kind::Kind;

/// An identity-bearing domain object shared across the application.
///
/// Implementors are held behind [`PublicObjectRef`] handles; the cache
/// only ever clones and drops handle shares, never the object itself.
pub trait PublicObject: Any + Send + Sync {
    /// The object's public identifier, unique within its kind.
    fn public_id(&self) -> &str;

    /// Runtime kind tag, compared before any narrowing cast.
    fn kind(&self) -> Kind;

    /// Hook for [`downcast`]. Implementations return `self`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Shared handle to a cached domain object.
pub type PublicObjectRef = Arc<dyn PublicObject>;

/// A concrete object type with a compile-time known kind tag.
///
/// Typed cache lookups that filter by kind compare candidates against
/// `T::KIND` before casting.
pub trait KindTagged: PublicObject {
    const KIND: Kind;
}

/// Narrow a shared handle to a concrete object type.
///
/// Returns `None` when the handle points at some other type; the caller's
/// share of the handle is untouched either way.
pub fn downcast<T: PublicObject>(object: &PublicObjectRef) -> Option<Arc<T>> {
    Arc::clone(object).into_any().downcast::<T>().ok()
}
