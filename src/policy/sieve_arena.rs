//! SIEVE cache replacement policy over a fixed slot arena.
//!
//! Same algorithm and observable behavior as
//! [`SieveCache`](crate::policy::sieve::SieveCache), but entries live in a
//! [`SlotArena`] allocated once with exactly `capacity` slots and are linked
//! by [`SlotId`] instead of pointers. Eviction returns the victim's slot to the
//! arena's free stack and the following insert reuses it, so the hot path
//! never allocates (beyond the pre-sized index map).
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, SlotId>
//!
//!   arena (SlotArena<Entry<K, V>>, capacity slots)
//!   ┌────────┬──────────────────────────────────────────────────────┐
//!   │ SlotId │ Entry { key, value, visited, prev, next }            │
//!   ├────────┼──────────────────────────────────────────────────────┤
//!   │ [0]    │ { A, vis: false, prev: Some(1), next: None }     ◄── tail
//!   │ [1]    │ { B, vis: true,  prev: Some(3), next: Some(0) }  ◄── hand
//!   │ [2]    │ (free)                                               │
//!   │ [3]    │ { D, vis: false, prev: None,    next: Some(1) }  ◄── head
//!   └────────┴──────────────────────────────────────────────────────┘
//!   free stack: [2]
//!
//!   head ─► [3] ◄──► [1] ◄──► [0] ◄── tail
//! ```
//!
//! ## Trade-offs
//!
//! | Aspect          | ArenaSieveCache               | SieveCache              |
//! |-----------------|-------------------------------|-------------------------|
//! | Allocation      | once, at construction         | one Box per insert      |
//! | Links           | `Option<SlotId>` (index)      | `NonNull` pointers      |
//! | Memory bound    | `capacity` slots, always      | grows with `len`        |
//! | Unsafe code     | none                          | pointer manipulation    |
//!
//! ## Example Usage
//!
//! ```
//! use sievekit::policy::sieve_arena::ArenaSieveCache;
//! use sievekit::traits::CoreCache;
//!
//! let mut cache = ArenaSieveCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // 1 is visited, so 2 goes
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SieveMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SieveMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, SieveMetricsRecorder};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

#[derive(Debug)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    visited: bool,
    key: K,
    value: V,
}

/// SIEVE cache backed by a fixed-capacity slot arena.
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve_arena::ArenaSieveCache;
/// use sievekit::traits::CoreCache;
///
/// let mut cache: ArenaSieveCache<u64, String> = ArenaSieveCache::new(100);
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get(&1).map(String::as_str), Some("one"));
/// assert_eq!(cache.capacity(), 100);
/// ```
pub struct ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    arena: SlotArena<Entry<K, V>>,
    map: FxHashMap<K, SlotId>,

    head: Option<SlotId>,
    tail: Option<SlotId>,
    hand: Option<SlotId>,

    #[cfg(feature = "metrics")]
    metrics: SieveMetrics,
}

impl<K, V> ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with `capacity` preallocated slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error for zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(Self {
            arena: SlotArena::with_capacity(capacity),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            hand: None,
            #[cfg(feature = "metrics")]
            metrics: SieveMetrics::default(),
        })
    }

    /// Returns the value for `key` and marks the entry visited.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        let entry = self.arena.get_mut(id)?;
        entry.visited = true;
        Some(&entry.value)
    }

    /// Inserts or updates an entry. See
    /// [`SieveCache::put`](crate::policy::sieve::SieveCache::put).
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            if let Some(entry) = self.arena.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
                entry.visited = true;
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.arena.is_full() {
            self.evict();
        }

        let entry = Entry {
            prev: None,
            next: None,
            visited: false,
            key: key.clone(),
            value,
        };
        let id = match self.arena.insert(entry) {
            Ok(id) => id,
            Err(_) => unreachable!("arena still full after eviction"),
        };

        self.map.insert(key, id);
        self.attach_head(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Returns `true` if `key` is cached. Never touches the visited bit.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Key the next eviction scan will examine first, if the hand is set.
    pub fn hand(&self) -> Option<&K> {
        self.hand
            .and_then(|id| self.arena.get(id))
            .map(|entry| &entry.key)
    }

    /// Arena slot currently holding `key`.
    pub fn slot_of(&self, key: &K) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    /// Drops every entry and returns all slots to the free stack.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let index = std::mem::take(&mut self.map);
        self.head = None;
        self.tail = None;
        self.hand = None;
        self.arena.clear();
        drop(index);

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    fn attach_head(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(entry) = self.arena.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        } else {
            return;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head) => head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|e| (e.prev, e.next)) else {
            return;
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
    }

    fn evict(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let Some(mut current) = self.hand.or(self.tail) else {
            return;
        };
        let mut steps = 0usize;

        loop {
            steps += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_scan_step();

            let Some(entry) = self.arena.get_mut(current) else {
                return;
            };
            if !entry.visited {
                break;
            }
            entry.visited = false;
            let prev = entry.prev;
            #[cfg(feature = "metrics")]
            self.metrics.record_demotion();

            match prev.or(self.tail) {
                Some(next) => current = next,
                None => return,
            }
        }

        // Unindex first so a panicking Hash/Eq cannot leave a SlotId that
        // later aliases a recycled slot.
        let Some(victim) = self.arena.get(current) else {
            return;
        };
        self.map.remove(&victim.key);
        self.hand = victim.prev;
        self.detach(current);
        self.arena.remove(current);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        trace!(
            slot = current.index(),
            steps,
            free = self.arena.free_len(),
            "arena sieve evicted entry"
        );
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        debug_assert_eq!(
            self.map.len(),
            self.arena.len(),
            "Index size doesn't match arena len"
        );
        debug_assert_eq!(
            self.arena.len() + self.arena.free_len(),
            self.arena.capacity(),
            "Live + free slots don't add up to capacity"
        );
        if self.arena.is_empty() {
            debug_assert!(self.head.is_none(), "Empty cache should have no head");
            debug_assert!(self.tail.is_none(), "Empty cache should have no tail");
            debug_assert!(self.hand.is_none(), "Empty cache should have no hand");
            return;
        }

        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            count += 1;
            assert!(count <= self.arena.len(), "Cycle detected in list");
            let Some(entry) = self.arena.get(id) else {
                panic!("List links to free slot {}", id.index());
            };
            debug_assert!(entry.prev == prev, "Broken prev linkage");
            prev = Some(id);
            current = entry.next;
        }
        debug_assert!(self.tail == prev, "Tail is not the last entry");
        debug_assert_eq!(count, self.arena.len(), "List count doesn't match arena len");
    }
}

impl<K, V> std::fmt::Debug for ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaSieveCache")
            .field("capacity", &self.arena.capacity())
            .field("len", &self.arena.len())
            .field("free", &self.arena.free_len())
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        ArenaSieveCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        ArenaSieveCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        ArenaSieveCache::contains(self, key)
    }

    #[inline]
    fn count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    fn clear(&mut self) {
        ArenaSieveCache::clear(self);
    }
}

impl<K, V> InspectCache<K, V> for ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> Vec<EntrySnapshot<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut current = self.head;
        while let Some(entry) = current.and_then(|id| self.arena.get(id)) {
            out.push(EntrySnapshot::new(
                entry.key.clone(),
                entry.value.clone(),
                entry.visited,
            ));
            current = entry.next;
        }
        out
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.arena.check_invariants()?;

        if self.map.len() != self.arena.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but arena holds {} entries",
                self.map.len(),
                self.arena.len()
            )));
        }
        if self.arena.is_empty() {
            if self.head.is_some() || self.tail.is_some() || self.hand.is_some() {
                return Err(InvariantError::new(
                    "empty cache still has head, tail or hand set",
                ));
            }
            return Ok(());
        }

        let mut seen = vec![false; self.arena.capacity()];
        let mut visited_count = 0usize;
        let mut prev: Option<SlotId> = None;
        let mut current = self.head;

        while let Some(id) = current {
            let idx = id.index();
            let entry = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("list links to free slot {idx}"))
            })?;
            if seen[idx] {
                return Err(InvariantError::new(format!("cycle detected at slot {idx}")));
            }
            seen[idx] = true;
            visited_count += 1;

            if entry.next == Some(id) || entry.prev == Some(id) {
                return Err(InvariantError::new(format!("slot {idx} links to itself")));
            }
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "broken prev linkage at slot {idx}"
                )));
            }
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index does not point at slot {idx}"
                )));
            }
            prev = Some(id);
            current = entry.next;
        }

        if self.tail != prev {
            return Err(InvariantError::new("tail is not the last entry"));
        }
        if visited_count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "list reaches {} entries but arena holds {}",
                visited_count,
                self.arena.len()
            )));
        }
        if let Some(hand) = self.hand {
            if !seen.get(hand.index()).copied().unwrap_or(false) {
                return Err(InvariantError::new(format!(
                    "hand points at slot {} outside the list",
                    hand.index()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> SieveMetricsSnapshot {
        SieveMetricsSnapshot::from_metrics(&self.metrics, self.arena.len(), self.arena.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> crate::metrics::traits::MetricsSnapshotProvider<SieveMetricsSnapshot>
    for ArenaSieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> SieveMetricsSnapshot {
        self.metrics_snapshot()
    }
}
