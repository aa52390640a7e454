//! Keyed response cache.
//!
//! # Design
//! - Entries are keyed by resource plus scope: a list scope carries the
//!   canonical filter query string, an item scope carries the record id.
//! - Mutations address entries through [`KeyPrefix`] rather than clearing the
//!   whole cache.
//! - Each list slot hands out monotonically increasing [`FetchTicket`]s;
//!   completing a ticket that is no longer the newest for its slot stores
//!   nothing and reports [`FetchOutcome::Superseded`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use cinedesk_api_models::ListFilters;
use tracing::trace;

/// Freshness window for ordinary list and item queries.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);
/// Freshness window for the genre option list used by movie dialogs.
pub const OPTIONS_STALE_TIME: Duration = Duration::from_secs(30 * 60);

/// Top-level resource a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `/movies/`
    Movies,
    /// `/movies/genres/`
    Genres,
    /// `/auth/admin/users/`
    Users,
    /// `/auth/profile/`
    Profile,
}

impl Resource {
    /// Short name used in logs and keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Genres => "genres",
            Self::Users => "users",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portion of a resource an entry covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A list page, identified by its canonical query string.
    List(String),
    /// A single record.
    Item(String),
    /// The resource as a whole (e.g. the current profile).
    Whole,
}

/// Cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Owning resource.
    pub resource: Resource,
    /// Covered portion.
    pub scope: Scope,
}

impl QueryKey {
    /// Key for a list page; equal filters produce equal keys.
    pub fn list<F: ListFilters>(resource: Resource, filters: &F) -> Self {
        Self {
            resource,
            scope: Scope::List(filters.to_query_string()),
        }
    }

    /// Key for one record.
    pub fn item(resource: Resource, id: impl ToString) -> Self {
        Self {
            resource,
            scope: Scope::Item(id.to_string()),
        }
    }

    /// Key for a resource without sub-scopes.
    #[must_use]
    pub const fn whole(resource: Resource) -> Self {
        Self {
            resource,
            scope: Scope::Whole,
        }
    }
}

/// Selector for a group of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Every key of the resource.
    Resource(Resource),
    /// Every list page of the resource.
    Lists(Resource),
    /// One record of the resource.
    Item(Resource, String),
}

impl KeyPrefix {
    /// Item prefix built from any displayable id.
    pub fn item(resource: Resource, id: impl ToString) -> Self {
        Self::Item(resource, id.to_string())
    }

    /// Whether `key` falls under this prefix.
    #[must_use]
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Resource(resource) => key.resource == *resource,
            Self::Lists(resource) => {
                key.resource == *resource && matches!(key.scope, Scope::List(_))
            }
            Self::Item(resource, id) => {
                key.resource == *resource && matches!(&key.scope, Scope::Item(item) if item == id)
            }
        }
    }
}

/// Claim on a fetch slot; only the newest ticket of a slot may store results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    resource: Resource,
    slot: &'static str,
    generation: u64,
}

impl FetchTicket {
    /// Resource the ticket was issued for.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    /// Generation number within the slot.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of completing a [`FetchTicket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// The result was stored and is returned.
    Stored(T),
    /// A newer fetch for the same slot started; the result was dropped.
    Superseded,
}

impl<T> FetchOutcome<T> {
    /// Stored value, if any.
    pub fn into_stored(self) -> Option<T> {
        match self {
            Self::Stored(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: DateTime<Utc>,
    invalidated: bool,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    generations: HashMap<(Resource, &'static str), u64>,
}

/// Shared response cache.
#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl QueryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry exists for `key`, fresh or not.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Value for `key` if it was fetched within `max_age` and has not been
    /// invalidated since.
    #[must_use]
    pub fn get_fresh<T: Clone + 'static>(&self, key: &QueryKey, max_age: Duration) -> Option<T> {
        self.get_fresh_at(key, max_age, Utc::now())
    }

    fn get_fresh_at<T: Clone + 'static>(
        &self,
        key: &QueryKey,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Option<T> {
        let max_age = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        if entry.invalidated || now.signed_duration_since(entry.fetched_at) > max_age {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Value for `key` regardless of freshness, for showing previous data
    /// while a refetch runs.
    #[must_use]
    pub fn get_any<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.lock()
            .entries
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    /// Store `value` under `key` as freshly fetched.
    pub fn insert<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        self.insert_at(key, value, Utc::now());
    }

    fn insert_at<T: Send + Sync + 'static>(&self, key: QueryKey, value: T, at: DateTime<Utc>) {
        self.lock().entries.insert(
            key,
            Entry {
                value: Arc::new(value),
                fetched_at: at,
                invalidated: false,
            },
        );
    }

    /// Mark every entry under `prefix` stale; returns how many were marked.
    pub fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        let mut inner = self.lock();
        let mut count = 0;
        for (key, entry) in &mut inner.entries {
            if prefix.matches(key) {
                entry.invalidated = true;
                count += 1;
            }
        }
        trace!(?prefix, count, "cache invalidated");
        count
    }

    /// Drop every entry under `prefix`; returns how many were removed.
    pub fn evict(&self, prefix: &KeyPrefix) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !prefix.matches(key));
        let count = before - inner.entries.len();
        trace!(?prefix, count, "cache evicted");
        count
    }

    /// Drop every entry and supersede every fetch in flight.
    ///
    /// Generation counters only ever grow, so a ticket issued before the
    /// clear can never match one issued after it.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        for generation in inner.generations.values_mut() {
            *generation += 1;
        }
    }

    /// Start a fetch for `slot` of `resource`, superseding any in flight.
    #[must_use]
    pub fn begin_fetch(&self, resource: Resource, slot: &'static str) -> FetchTicket {
        let mut inner = self.lock();
        let generation = inner.generations.entry((resource, slot)).or_insert(0);
        *generation += 1;
        FetchTicket {
            resource,
            slot,
            generation: *generation,
        }
    }

    /// Whether `ticket` is still the newest for its slot.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.lock()
            .generations
            .get(&(ticket.resource, ticket.slot))
            .is_some_and(|generation| *generation == ticket.generation)
    }

    /// Store a fetch result if `ticket` is still current.
    pub fn complete<T: Clone + Send + Sync + 'static>(
        &self,
        ticket: &FetchTicket,
        key: QueryKey,
        value: T,
    ) -> FetchOutcome<T> {
        if !self.is_current(ticket) {
            trace!(
                resource = %ticket.resource,
                slot = ticket.slot,
                generation = ticket.generation,
                "discarding superseded fetch"
            );
            return FetchOutcome::Superseded;
        }
        self.insert(key, value.clone());
        FetchOutcome::Stored(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_api_models::{GenreFilters, MovieFilters};

    fn movie_list(page: u32) -> QueryKey {
        QueryKey::list(
            Resource::Movies,
            &MovieFilters {
                page: Some(page),
                ..MovieFilters::default()
            },
        )
    }

    #[test]
    fn equal_filters_share_a_key() {
        let a = QueryKey::list(Resource::Genres, &GenreFilters::default());
        let b = QueryKey::list(Resource::Genres, &GenreFilters::default());
        assert_eq!(a, b);
        assert_ne!(movie_list(1), movie_list(2));
    }

    #[test]
    fn fresh_entries_expire_after_stale_time() {
        let cache = QueryCache::new();
        let fetched = Utc::now();
        cache.insert_at(movie_list(1), 7_u32, fetched);

        let within = fetched + TimeDelta::minutes(4);
        let after = fetched + TimeDelta::minutes(6);
        assert_eq!(
            cache.get_fresh_at::<u32>(&movie_list(1), DEFAULT_STALE_TIME, within),
            Some(7)
        );
        assert_eq!(
            cache.get_fresh_at::<u32>(&movie_list(1), DEFAULT_STALE_TIME, after),
            None
        );
        assert_eq!(
            cache.get_fresh_at::<u32>(&movie_list(1), OPTIONS_STALE_TIME, after),
            Some(7)
        );
        assert_eq!(cache.get_any::<u32>(&movie_list(1)), Some(7));
    }

    #[test]
    fn wrong_type_is_a_miss() {
        let cache = QueryCache::new();
        cache.insert(movie_list(1), 7_u32);
        assert_eq!(cache.get_fresh::<String>(&movie_list(1), DEFAULT_STALE_TIME), None);
    }

    #[test]
    fn list_invalidation_leaves_items_and_other_resources() {
        let cache = QueryCache::new();
        cache.insert(movie_list(1), 1_u32);
        cache.insert(movie_list(2), 2_u32);
        cache.insert(QueryKey::item(Resource::Movies, "m-1"), 3_u32);
        cache.insert(QueryKey::list(Resource::Genres, &GenreFilters::default()), 4_u32);

        assert_eq!(cache.invalidate(&KeyPrefix::Lists(Resource::Movies)), 2);
        assert_eq!(cache.get_fresh::<u32>(&movie_list(1), DEFAULT_STALE_TIME), None);
        assert_eq!(
            cache.get_fresh::<u32>(&QueryKey::item(Resource::Movies, "m-1"), DEFAULT_STALE_TIME),
            Some(3)
        );
        assert_eq!(
            cache.get_fresh::<u32>(
                &QueryKey::list(Resource::Genres, &GenreFilters::default()),
                DEFAULT_STALE_TIME
            ),
            Some(4)
        );
        assert!(cache.contains(&movie_list(1)));
    }

    #[test]
    fn evict_removes_only_matching_item() {
        let cache = QueryCache::new();
        cache.insert(QueryKey::item(Resource::Users, 4), 1_u32);
        cache.insert(QueryKey::item(Resource::Users, 5), 2_u32);
        assert_eq!(cache.evict(&KeyPrefix::item(Resource::Users, 4)), 1);
        assert!(!cache.contains(&QueryKey::item(Resource::Users, 4)));
        assert!(cache.contains(&QueryKey::item(Resource::Users, 5)));
        assert_eq!(cache.evict(&KeyPrefix::Resource(Resource::Users)), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn superseded_fetch_does_not_overwrite_newer_result() {
        let cache = QueryCache::new();
        let slow = cache.begin_fetch(Resource::Movies, "list");
        let fast = cache.begin_fetch(Resource::Movies, "list");
        let other_slot = cache.begin_fetch(Resource::Movies, "options");

        assert_eq!(
            cache.complete(&fast, movie_list(2), "page two"),
            FetchOutcome::Stored("page two")
        );
        assert_eq!(
            cache.complete(&slow, movie_list(1), "page one"),
            FetchOutcome::Superseded
        );
        assert!(!cache.contains(&movie_list(1)));
        assert!(cache.is_current(&other_slot));
        assert!(fast.generation() > slow.generation());
    }

    #[test]
    fn clear_supersedes_tickets_from_before() {
        let cache = QueryCache::new();
        let old = cache.begin_fetch(Resource::Movies, "list");
        cache.clear();
        assert!(!cache.is_current(&old));

        let new = cache.begin_fetch(Resource::Movies, "list");
        assert_ne!(old, new);
        assert_eq!(
            cache.complete(&old, movie_list(1), "previous session"),
            FetchOutcome::Superseded
        );
        assert!(cache.is_empty());
        assert_eq!(
            cache.complete(&new, movie_list(1), "current session"),
            FetchOutcome::Stored("current session")
        );
    }
}
