//! # Cache Trait Hierarchy
//!
//! This module defines the capability contract shared by every cache in the
//! crate: the two SIEVE realizations, the FIFO/LRU baselines, the
//! policy-dispatching [`Cache`](crate::builder::Cache), and (through its
//! command set) the [`CacheActor`](crate::actor::CacheActor).
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐   ┌──────────────────────────────────────┐
//!   │            CoreCache<K, V>              │   │         InspectCache<K, V>           │
//!   │                                         │   │                                      │
//!   │  put(&mut, K, V) → Option<V>            │   │  snapshot(&) → Vec<EntrySnapshot>    │
//!   │  get(&mut, &K) → Option<&V>             │   │  check_invariants(&) → Result<()>    │
//!   │  contains(&, &K) → bool                 │   │                                      │
//!   │  count(&) → usize                       │   │  diagnostic surface: head → tail     │
//!   │  is_empty(&) → bool                     │   │  order and structural consistency    │
//!   │  capacity(&) → usize                    │   │                                      │
//!   │  clear(&mut)                            │   │                                      │
//!   └────────────────────┬────────────────────┘   └──────────────────┬───────────────────┘
//!                        │                                           │
//!        ┌───────────────┼───────────────┬───────────────┬───────────┘
//!        ▼               ▼               ▼               ▼
//!   SieveCache    ArenaSieveCache    FifoCache       LruCache
//! ```
//!
//! ## Side Effects
//!
//! | Operation  | SIEVE                          | FIFO          | LRU              |
//! |------------|--------------------------------|---------------|------------------|
//! | `get`      | sets visited bit on hit        | none          | moves to head    |
//! | `put` hit  | replaces value, sets visited   | replaces value| moves to head    |
//! | `put` miss | may evict one (hand scan)      | evicts oldest | evicts tail      |
//! | `contains` | none                           | none          | none             |
//!
//! ## Thread Safety
//!
//! - Individual cache implementations are **NOT thread-safe**; every mutating
//!   operation takes `&mut self`.
//! - Share a cache across threads with [`CacheActor`](crate::actor::CacheActor)
//!   (message passing, no locks) or, with the `concurrency` feature,
//!   [`ConcurrentCache`](crate::concurrent::ConcurrentCache) (one mutex).

use crate::error::InvariantError;

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use sievekit::traits::CoreCache;
/// use sievekit::policy::sieve::SieveCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = SieveCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.count(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates a key-value pair, returning the previous value if
    /// the key was present.
    ///
    /// If the key is absent and the cache is full, one entry is evicted
    /// according to the cache's policy before the new entry is inserted.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update policy state (visited bit, recency). Use
    /// [`contains`](Self::contains) to probe without affecting eviction.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating any policy state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of live entries.
    fn count(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// One entry as seen by [`InspectCache::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot<K, V> {
    pub key: K,
    pub value: V,
    /// Always `false` for policies without a visited bit.
    pub visited: bool,
}

impl<K, V> EntrySnapshot<K, V> {
    pub fn new(key: K, value: V, visited: bool) -> Self {
        Self {
            key,
            value,
            visited,
        }
    }
}

/// Diagnostic surface used to verify eviction behavior in tests.
///
/// Not part of the caching contract: `snapshot` is O(n) and clones every
/// entry.
///
/// # Example
///
/// ```
/// use sievekit::traits::{CoreCache, InspectCache};
/// use sievekit::policy::sieve::SieveCache;
///
/// let mut cache = SieveCache::new(2);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.get(&1);
///
/// let keys: Vec<_> = cache.snapshot().into_iter().map(|e| (e.key, e.visited)).collect();
/// assert_eq!(keys, vec![(2, false), (1, true)]);
/// assert!(cache.check_invariants().is_ok());
/// ```
pub trait InspectCache<K, V> {
    /// Returns every entry ordered from head (newest) to tail.
    fn snapshot(&self) -> Vec<EntrySnapshot<K, V>>
    where
        K: Clone,
        V: Clone;

    /// Walks the internal structure and reports the first violated invariant.
    fn check_invariants(&self) -> Result<(), InvariantError>;
}
