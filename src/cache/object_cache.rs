//! Multi-key association cache over shared domain objects.

use std::fmt;
use std::mem;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::CacheSettings;
use crate::datamodel::object::{KindTagged, PublicObject, PublicObjectRef, downcast};
use crate::query::ObjectQuery;

/// Lookup key for a cached object: the object's own public ID paired with
/// the public ID of its logical parent.
///
/// A parentless object is stored under the self-parented convention
/// (`own_id == parent_id`, see [`MultiKey::self_parented`]); an empty
/// `parent_id` is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiKey {
    pub own_id: String,
    pub parent_id: String,
}

impl MultiKey {
    pub fn new(own_id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            own_id: own_id.into(),
            parent_id: parent_id.into(),
        }
    }

    /// Key for an object with no parent association.
    pub fn self_parented(own_id: impl Into<String>) -> Self {
        let own_id = own_id.into();
        Self {
            parent_id: own_id.clone(),
            own_id,
        }
    }

    pub fn is_self_parented(&self) -> bool {
        self.own_id == self.parent_id
    }
}

/// How an object ID is associated, as reported by
/// [`ObjectCache::association_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationState {
    /// No entry carries this ID.
    NotFound,
    /// The most recent matching entry ties the object to a distinct parent.
    HasParent,
    /// The most recent matching entry is self-parented (unassociated).
    IsOwnParent,
}

/// In-memory index of previously fetched domain objects and their parent
/// associations, so that frontend delegates query here instead of hitting
/// the backend again.
///
/// The store is an insertion-ordered sequence, not a map: the same
/// `own_id` may legitimately appear under several parents, and
/// single-result lookups resolve ties in favor of the most recently added
/// entry. Only an exact `(key, handle)` duplicate is refused.
///
/// The cache holds one shared reference per entry. Removal and
/// [`clear`](Self::clear) release that share on the spot; objects held
/// elsewhere stay alive.
///
/// Not internally synchronized. Callers confine a cache to one thread or
/// serialize access through [`SharedObjectCache`](super::SharedObjectCache).
pub struct ObjectCache {
    entries: Vec<(MultiKey, PublicObjectRef)>,
    settings: CacheSettings,
    duplicates: usize,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self::with_settings(CacheSettings::default())
    }

    pub fn with_settings(settings: CacheSettings) -> Self {
        Self {
            entries: Vec::with_capacity(settings.initial_capacity),
            settings,
            duplicates: 0,
        }
    }

    /// Add an association entry.
    ///
    /// The entry is dropped without a trace when `key.own_id` does not
    /// match the object's reported public ID, or when `key.parent_id` is
    /// empty - parentless objects go in under [`MultiKey::self_parented`].
    /// An exact `(key, handle)` duplicate is counted and logged up to the
    /// configured cap, then dropped.
    pub fn add_object(&mut self, key: MultiKey, object: PublicObjectRef) {
        if key.own_id != object.public_id() || key.parent_id.is_empty() {
            return;
        }

        let duplicate = self
            .entries
            .iter()
            .any(|(k, o)| *k == key && Arc::ptr_eq(o, &object));
        if duplicate {
            self.note_duplicate(&key);
            return;
        }

        self.entries.push((key, object));
    }

    fn note_duplicate(&mut self, key: &MultiKey) {
        let limit = self.settings.duplicate_log_limit;
        if self.duplicates < limit {
            debug!(
                "Object '{}' (parent '{}') already cached, entry ignored",
                key.own_id, key.parent_id
            );
        } else if self.duplicates == limit {
            debug!(
                "{} duplicate objects reported, further ones will not be logged",
                limit
            );
        }
        self.duplicates += 1;
    }

    /// Last entry stored under the given own ID, whatever its kind.
    pub fn object_by_own_id(&self, own_id: &str) -> Option<PublicObjectRef> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.own_id == own_id)
            .map(|(_, object)| Arc::clone(object))
    }

    /// Last entry stored under the given own ID, narrowed to `T`.
    ///
    /// The winning entry is selected by key alone and cast afterwards: if
    /// the most recent entry under this ID is not a `T`, the result is
    /// `None` even when an older entry would have matched the type.
    pub fn typed_object_by_own_id<T: PublicObject>(&self, own_id: &str) -> Option<Arc<T>> {
        self.object_by_own_id(own_id)
            .and_then(|object| downcast::<T>(&object))
    }

    /// Last entry associated with the given parent ID, narrowed to `T`.
    ///
    /// Same select-then-cast behavior as
    /// [`typed_object_by_own_id`](Self::typed_object_by_own_id).
    pub fn typed_object_by_parent_id<T: PublicObject>(&self, parent_id: &str) -> Option<Arc<T>> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.parent_id == parent_id)
            .and_then(|(_, object)| downcast::<T>(object))
    }

    /// Every entry associated with the given parent ID whose runtime kind
    /// tag is `T`'s, in insertion order.
    pub fn typed_objects_by_parent_id<T: KindTagged>(&self, parent_id: &str) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter(|(key, object)| key.parent_id == parent_id && object.kind() == T::KIND)
            .filter_map(|(_, object)| downcast::<T>(object))
            .collect()
    }

    /// Every entry associated with the given parent ID, kinds mixed, in
    /// insertion order.
    pub fn objects_by_parent_id(&self, parent_id: &str) -> Vec<PublicObjectRef> {
        self.entries
            .iter()
            .filter(|(key, _)| key.parent_id == parent_id)
            .map(|(_, object)| Arc::clone(object))
            .collect()
    }

    /// Parent ID recorded for the given own ID, most recent entry winning.
    pub fn parent_id(&self, own_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.own_id == own_id)
            .map(|(key, _)| key.parent_id.as_str())
    }

    /// Association verdict for the given ID.
    ///
    /// Every matching entry overwrites the verdict, so with the same ID
    /// stored both self-parented and under a real parent, the entry added
    /// last decides.
    pub fn association_info(&self, own_id: &str) -> AssociationState {
        let mut state = AssociationState::NotFound;
        for (key, _) in &self.entries {
            if key.own_id != own_id {
                continue;
            }
            state = if key.is_self_parented() {
                AssociationState::IsOwnParent
            } else {
                AssociationState::HasParent
            };
        }
        state
    }

    /// The object stored self-parented under the given ID, narrowed to `T`.
    pub fn unassociated_object<T: PublicObject>(&self, own_id: &str) -> Option<Arc<T>> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.own_id == own_id && key.is_self_parented())
            .and_then(|(_, object)| downcast::<T>(object))
    }

    /// Whether some entry stores the given ID, as a `T`, under a parent.
    ///
    /// First match wins, unlike the last-wins lookups above. A
    /// self-parented entry counts: its parent slot is filled with its own
    /// ID. Use [`association_info`](Self::association_info) to tell the
    /// two apart.
    pub fn has_parent<T: KindTagged>(&self, own_id: &str) -> bool {
        self.entries.iter().any(|(key, object)| {
            key.own_id == own_id && object.kind() == T::KIND && !key.parent_id.is_empty()
        })
    }

    /// Remove every entry whose key equals `key` on both components,
    /// releasing each handle share on the spot. Entries matching on
    /// `own_id` alone stay. Returns the number removed.
    pub fn remove_object(&mut self, key: &MultiKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before - self.entries.len()
    }

    /// Drop every entry and its handle share.
    pub fn clear(&mut self) {
        debug!("Clearing object cache ({} entries)", self.entries.len());
        self.entries.clear();
    }

    /// Re-fetch every entry's object from `query` and rebuild the store
    /// under the same keys. Entries the backend no longer knows are
    /// dropped from the refreshed set.
    ///
    /// The backend call is typically database-bound; keep this off
    /// latency-sensitive paths. No retries are attempted.
    pub fn update_objects<Q: ObjectQuery + ?Sized>(&mut self, query: &Q) {
        let started = Instant::now();

        let stale = mem::take(&mut self.entries);
        for (key, object) in &stale {
            if let Some(fresh) = query.object(object.kind(), &key.own_id) {
                self.add_object(key.clone(), fresh);
            }
        }

        info!(
            "Object cache refreshed: kept {} of {} entries in {:?}",
            self.entries.len(),
            stale.len(),
            started.elapsed()
        );
    }

    /// Storage footprint of the handles themselves.
    ///
    /// Cached objects are shared with the rest of the application, so this
    /// deliberately excludes the pointed-to objects: it grows by one
    /// handle-size per entry, nothing else.
    pub fn byte_size(&self) -> usize {
        self.entries.len() * mem::size_of::<PublicObjectRef>()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Duplicate submissions refused since construction.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("entries", &self.entries.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::datamodel::kind::Kind;
    use crate::datamodel::models::{Comment, Event, Magnitude, Origin};
    use crate::query::MemoryObjectQuery;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap()
    }

    fn origin(id: &str) -> Arc<Origin> {
        Arc::new(Origin::new(id, time(), -21.24, 55.71, 12.0))
    }

    fn event(id: &str) -> Arc<Event> {
        Arc::new(Event::new(id))
    }

    fn magnitude(id: &str, value: f64) -> Arc<Magnitude> {
        Arc::new(Magnitude::new(id, value, "MLv"))
    }

    #[test]
    fn test_add_and_get_by_own_id() {
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());

        assert_eq!(cache.len(), 1);
        let found = cache.object_by_own_id("origin-1").unwrap();
        assert_eq!(found.public_id(), "origin-1");
        assert!(cache.object_by_own_id("origin-2").is_none());
    }

    #[test]
    fn test_rejects_empty_parent_id() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", ""), origin("origin-1"));

        assert!(cache.is_empty());
        assert_eq!(cache.duplicate_count(), 0);
    }

    #[test]
    fn test_rejects_mismatched_own_id() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-2", "event-1"), origin("origin-1"));

        assert!(cache.is_empty());
    }

    #[test]
    fn test_duplicate_key_and_handle_refused() {
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.duplicate_count(), 2);
    }

    #[test]
    fn test_same_key_different_handles_coexist() {
        // Distinct handles under one key are two entries, not a duplicate.
        let mut cache = ObjectCache::new();
        let first = origin("origin-1");
        let second = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), first.clone());
        cache.add_object(MultiKey::new("origin-1", "event-1"), second.clone());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.duplicate_count(), 0);

        // The entry added last wins single-result lookups.
        let found = cache.object_by_own_id("origin-1").unwrap();
        let found = downcast::<Origin>(&found).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
    }

    #[test]
    fn test_same_own_id_under_several_parents() {
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        cache.add_object(MultiKey::new("origin-1", "event-2"), o.clone());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.parent_id("origin-1"), Some("event-2"));
    }

    #[test]
    fn test_typed_lookup_casts_the_winning_entry_only() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("obj-1", "event-1"), origin("obj-1"));
        cache.add_object(MultiKey::new("obj-1", "event-1"), magnitude("obj-1", 3.4));

        // The most recent entry under "obj-1" is a Magnitude, so asking
        // for an Origin fails even though an older entry would match.
        assert!(cache.typed_object_by_own_id::<Origin>("obj-1").is_none());
        assert!(cache.typed_object_by_own_id::<Magnitude>("obj-1").is_some());
    }

    #[test]
    fn test_typed_lookup_by_parent_id() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", "event-1"), origin("origin-1"));

        let found = cache.typed_object_by_parent_id::<Origin>("event-1").unwrap();
        assert_eq!(found.public_id, "origin-1");
        assert!(cache.typed_object_by_parent_id::<Event>("event-1").is_none());
        assert!(cache.typed_object_by_parent_id::<Origin>("event-9").is_none());
    }

    #[test]
    fn test_typed_objects_by_parent_filters_on_kind() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", "event-1"), origin("origin-1"));
        cache.add_object(MultiKey::new("mag-1", "event-1"), magnitude("mag-1", 3.4));
        cache.add_object(MultiKey::new("mag-2", "event-1"), magnitude("mag-2", 3.6));
        cache.add_object(MultiKey::new("mag-3", "event-2"), magnitude("mag-3", 2.1));

        let magnitudes = cache.typed_objects_by_parent_id::<Magnitude>("event-1");
        assert_eq!(magnitudes.len(), 2);
        // Insertion order preserved
        assert_eq!(magnitudes[0].public_id, "mag-1");
        assert_eq!(magnitudes[1].public_id, "mag-2");

        let origins = cache.typed_objects_by_parent_id::<Origin>("event-1");
        assert_eq!(origins.len(), 1);

        let comments = cache.typed_objects_by_parent_id::<Comment>("event-1");
        assert!(comments.is_empty());
    }

    #[test]
    fn test_untyped_objects_by_parent_returns_all_kinds() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", "event-1"), origin("origin-1"));
        cache.add_object(MultiKey::new("mag-1", "event-1"), magnitude("mag-1", 3.4));

        let children = cache.objects_by_parent_id("event-1");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), Kind::Origin);
        assert_eq!(children[1].kind(), Kind::Magnitude);
    }

    #[test]
    fn test_association_info_last_match_decides() {
        // Same origin stored once under an event and once self-parented.
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        cache.add_object(MultiKey::self_parented("origin-1"), o.clone());
        assert_eq!(
            cache.association_info("origin-1"),
            AssociationState::IsOwnParent
        );

        // Reversed insertion order flips the verdict.
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::self_parented("origin-1"), o.clone());
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        assert_eq!(
            cache.association_info("origin-1"),
            AssociationState::HasParent
        );

        assert_eq!(
            cache.association_info("origin-9"),
            AssociationState::NotFound
        );
    }

    #[test]
    fn test_unassociated_object() {
        let mut cache = ObjectCache::new();
        let free = origin("origin-1");
        let tied = origin("origin-2");
        cache.add_object(MultiKey::self_parented("origin-1"), free.clone());
        cache.add_object(MultiKey::new("origin-2", "event-1"), tied.clone());

        let found = cache.unassociated_object::<Origin>("origin-1").unwrap();
        assert!(Arc::ptr_eq(&found, &free));
        assert!(cache.unassociated_object::<Origin>("origin-2").is_none());
    }

    #[test]
    fn test_has_parent() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", "event-1"), origin("origin-1"));

        assert!(cache.has_parent::<Origin>("origin-1"));
        // Kind tag is checked, not just the key
        assert!(!cache.has_parent::<Event>("origin-1"));
        assert!(!cache.has_parent::<Origin>("origin-9"));
    }

    #[test]
    fn test_has_parent_counts_self_parented_entries() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::self_parented("origin-1"), origin("origin-1"));

        assert!(cache.has_parent::<Origin>("origin-1"));
        assert_eq!(
            cache.association_info("origin-1"),
            AssociationState::IsOwnParent
        );
    }

    #[test]
    fn test_remove_object_matches_the_whole_key() {
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        cache.add_object(MultiKey::new("origin-1", "event-2"), o.clone());

        let removed = cache.remove_object(&MultiKey::new("origin-1", "event-1"));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        // The partially-matching entry survived
        assert_eq!(cache.parent_id("origin-1"), Some("event-2"));

        assert_eq!(cache.remove_object(&MultiKey::new("origin-1", "event-9")), 0);
    }

    #[test]
    fn test_remove_adjacent_matches_without_skipping() {
        let mut cache = ObjectCache::new();
        let first = origin("origin-1");
        let second = origin("origin-1");
        let third = origin("origin-1");
        let key = MultiKey::new("origin-1", "event-1");
        cache.add_object(key.clone(), first);
        cache.add_object(key.clone(), second);
        cache.add_object(key.clone(), third);

        // All three entries share the key; none may be skipped.
        assert_eq!(cache.remove_object(&key), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_releases_only_the_cache_share() {
        let mut cache = ObjectCache::new();
        let o = origin("origin-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), o.clone());
        assert_eq!(Arc::strong_count(&o), 2);

        cache.clear();
        assert!(cache.is_empty());
        // The external holder still owns a live object.
        assert_eq!(Arc::strong_count(&o), 1);
        assert_eq!(o.public_id, "origin-1");
    }

    #[test]
    fn test_update_objects_refreshes_and_drops_missing() {
        let mut cache = ObjectCache::new();
        let stale_origin = origin("origin-1");
        let stale_event = event("event-1");
        cache.add_object(MultiKey::new("origin-1", "event-1"), stale_origin.clone());
        cache.add_object(MultiKey::self_parented("event-1"), stale_event.clone());

        // Backend knows a fresher origin but has forgotten the event.
        let fresh_origin = Arc::new(Origin::new("origin-1", time(), -21.3, 55.8, 15.5));
        let mut query = MemoryObjectQuery::new();
        query.insert(fresh_origin.clone());

        cache.update_objects(&query);

        assert_eq!(cache.len(), 1);
        let cached = cache.typed_object_by_own_id::<Origin>("origin-1").unwrap();
        assert!(Arc::ptr_eq(&cached, &fresh_origin));
        assert!(!Arc::ptr_eq(&cached, &stale_origin));
        // The key survived the refresh unchanged.
        assert_eq!(cache.parent_id("origin-1"), Some("event-1"));
        assert!(cache.object_by_own_id("event-1").is_none());
    }

    #[test]
    fn test_byte_size_counts_handles_not_objects() {
        let mut cache = ObjectCache::new();
        cache.add_object(MultiKey::new("origin-1", "event-1"), origin("origin-1"));
        let per_entry = cache.byte_size();
        assert_eq!(per_entry, mem::size_of::<PublicObjectRef>());

        // A wildly larger object adds exactly one more handle-size.
        let big = Arc::new(Comment::new("comment-1", "x".repeat(1 << 20)));
        cache.add_object(MultiKey::new("comment-1", "event-1"), big);
        assert_eq!(cache.byte_size(), 2 * per_entry);
    }

    #[test]
    fn test_duplicate_logging_cap_does_not_stop_counting() {
        init_tracing();
        let mut cache = ObjectCache::with_settings(CacheSettings::default().duplicate_log_limit(2));
        let o = origin("origin-1");
        let key = MultiKey::new("origin-1", "event-1");
        cache.add_object(key.clone(), o.clone());
        for _ in 0..6 {
            cache.add_object(key.clone(), o.clone());
        }

        // Logging is capped, the counter is not.
        assert_eq!(cache.duplicate_count(), 6);
        assert_eq!(cache.len(), 1);
    }
}
