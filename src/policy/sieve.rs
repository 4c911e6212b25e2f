//! SIEVE cache replacement policy, pointer-linked form.
//!
//! Entries live in individually boxed nodes joined by raw `prev`/`next`
//! pointers, ordered by insertion time. A hit only sets the node's `visited`
//! bit; nothing moves. Eviction walks a persistent *hand* from the tail toward
//! the head, clearing visited bits until it finds an unvisited victim.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         SieveCache<K, V> Layout                             │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  map: FxHashMap<K, NonNull<Node>>     (key -> node pointer)         │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   head (newest)                                               tail (oldest) │
//! │     │                                                               │       │
//! │     ▼                                                               ▼       │
//! │   ┌─────┐  next  ┌─────┐  next  ┌─────┐  next  ┌─────┐  next  ┌─────┐      │
//! │   │  E  │ ─────► │  D  │ ─────► │  C  │ ─────► │  B  │ ─────► │  A  │      │
//! │   │     │ ◄───── │ vis │ ◄───── │     │ ◄───── │ vis │ ◄───── │     │      │
//! │   └─────┘  prev  └─────┘  prev  └─────┘  prev  └─────┘  prev  └─────┘      │
//! │                                    ▲                                        │
//! │                                    │                                        │
//! │                                  hand (resumes here, moves toward head)     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! GET(key):
//!   1. Look up node in hash map
//!   2. Set visited = true
//!   3. Return value                      (no list operations)
//!
//! PUT(key, value):
//!   1. If key exists: replace value, set visited = true, keep position
//!   2. If at capacity: EVICT()
//!   3. Allocate node (visited = false), link at head
//!
//! EVICT():
//!   node = hand or tail
//!   while node.visited:
//!     node.visited = false               // demotion
//!     node = node.prev or tail           // wrap at head
//!   hand = node.prev                     // none if victim was the head
//!   unlink and free node
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time   | Notes                                   |
//! |------------|--------|-----------------------------------------|
//! | `get`      | O(1)   | Hash lookup + bit set                   |
//! | `put`      | O(1)*  | *Amortized; eviction may sweep          |
//! | `contains` | O(1)   | Hash lookup only, never sets the bit    |
//! | `clear`    | O(n)   | Frees every node                        |
//!
//! The arena-backed [`ArenaSieveCache`](crate::policy::sieve_arena::ArenaSieveCache)
//! runs the same algorithm without per-insert allocation and is checked
//! against this type for identical behavior.
//!
//! ## Example Usage
//!
//! ```
//! use sievekit::policy::sieve::SieveCache;
//! use sievekit::traits::CoreCache;
//!
//! let mut cache = SieveCache::new(3);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! // Hit marks "a" visited; it survives the next eviction.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.put("d", 4);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

use std::hash::Hash;
use std::ptr::NonNull;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SieveMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SieveMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, SieveMetricsRecorder};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

/// Node in the SIEVE list.
///
/// Links first, then the visited flag, then the payload.
#[repr(C)]
struct Node<K, V> {
    prev: Option<NonNull<Node<K, V>>>,
    next: Option<NonNull<Node<K, V>>>,
    visited: bool,
    key: K,
    value: V,
}

/// SIEVE cache over heap-allocated, pointer-linked nodes.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve::SieveCache;
/// use sievekit::traits::CoreCache;
///
/// let mut cache = SieveCache::new(2);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.put(3, "three"); // evicts 1, nothing was visited
///
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.count(), 2);
/// ```
pub struct SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, NonNull<Node<K, V>>>,

    /// Most recently inserted node.
    head: Option<NonNull<Node<K, V>>>,
    /// Oldest surviving node.
    tail: Option<NonNull<Node<K, V>>>,
    /// Where the next eviction scan resumes.
    hand: Option<NonNull<Node<K, V>>>,

    capacity: usize,

    #[cfg(feature = "metrics")]
    metrics: SieveMetrics,
}

// SAFETY: SieveCache exclusively owns every node; moving it moves the nodes.
unsafe impl<K, V> Send for SieveCache<K, V>
where
    K: Clone + Eq + Hash + Send,
    V: Send,
{
}

// SAFETY: &SieveCache only hands out shared references into owned nodes.
unsafe impl<K, V> Sync for SieveCache<K, V>
where
    K: Clone + Eq + Hash + Sync,
    V: Sync,
{
}

impl<K, V> SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new SIEVE cache holding at most `capacity` entries.
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

    /// Creates a new SIEVE cache, returning an error for zero capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    /// use sievekit::traits::CoreCache;
    ///
    /// let cache = SieveCache::<String, i32>::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(SieveCache::<String, i32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            hand: None,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: SieveMetrics::default(),
        })
    }

    /// Returns the value for `key` and marks the entry visited.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node_ptr = match self.map.get(key) {
            Some(&ptr) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                ptr
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        // SAFETY: every pointer in `map` refers to a live node owned by self.
        unsafe {
            let node = &mut *node_ptr.as_ptr();
            node.visited = true;
            Some(&node.value)
        }
    }

    /// Inserts or updates an entry.
    ///
    /// An update replaces the value and marks the entry visited without
    /// moving it; a new key is linked at the head after evicting one entry if
    /// the cache is full.
    ///
    /// # Example
    ///
    /// ```
    /// use sievekit::policy::sieve::SieveCache;
    ///
    /// let mut cache = SieveCache::new(2);
    /// assert_eq!(cache.put("a", 1), None);
    /// assert_eq!(cache.put("a", 10), Some(1));
    /// assert_eq!(cache.get(&"a"), Some(&10));
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&node_ptr) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            // SAFETY: pointer comes from `map`, so the node is live.
            let node = unsafe { &mut *node_ptr.as_ptr() };
            node.visited = true;
            return Some(std::mem::replace(&mut node.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict();
        }

        let node = Box::new(Node {
            prev: None,
            next: None,
            visited: false,
            key: key.clone(),
            value,
        });
        let node_ptr = NonNull::from(Box::leak(node));

        self.map.insert(key, node_ptr);
        self.attach_head(node_ptr);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Returns `true` if `key` is cached. Never touches the visited bit.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn count(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Key the next eviction scan will examine first, if the hand is set.
    pub fn hand(&self) -> Option<&K> {
        // SAFETY: the hand always refers to a live node or is None.
        self.hand.map(|ptr| unsafe { &(*ptr.as_ptr()).key })
    }

    /// Frees every node and resets head, tail and hand.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.free_all();

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Link a detached node in front of the current head.
    #[inline(always)]
    fn attach_head(&mut self, mut node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_mut();
            node.prev = None;
            node.next = self.head;

            match self.head {
                Some(mut h) => h.as_mut().prev = Some(node_ptr),
                None => self.tail = Some(node_ptr),
            }

            self.head = Some(node_ptr);
        }
    }

    /// Unlink a node from its neighbours.
    #[inline(always)]
    fn detach(&mut self, node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_ref();
            let prev = node.prev;
            let next = node.next;

            match prev {
                Some(mut p) => p.as_mut().next = next,
                None => self.head = next,
            }

            match next {
                Some(mut n) => n.as_mut().prev = prev,
                None => self.tail = prev,
            }
        }
    }

    /// Runs the hand until it finds an unvisited node, then frees that node.
    fn evict(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let Some(mut current) = self.hand.or(self.tail) else {
            return;
        };
        let mut steps = 0usize;

        // Terminates: every visited node passed over is demoted, so a full
        // lap always reaches an unvisited node.
        loop {
            steps += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_scan_step();

            // SAFETY: `current` is always a live node of this list.
            let node = unsafe { &mut *current.as_ptr() };
            if !node.visited {
                break;
            }
            node.visited = false;
            #[cfg(feature = "metrics")]
            self.metrics.record_demotion();

            match node.prev.or(self.tail) {
                Some(next) => current = next,
                None => return,
            }
        }

        // Unindex before reclaiming; a panicking Hash/Eq must not leave a
        // dangling pointer in `map`.
        // SAFETY: `current` is live until the Box below reclaims it.
        self.map.remove(unsafe { &current.as_ref().key });
        self.hand = unsafe { current.as_ref().prev };
        self.detach(current);
        let node = unsafe { Box::from_raw(current.as_ptr()) };

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        trace!(steps, len = self.map.len(), "sieve evicted entry");
    }

    /// Empties the cache, then frees the detached nodes. A panicking value
    /// drop leaks the remaining nodes but leaves `self` empty and valid.
    fn free_all(&mut self) {
        let index = std::mem::take(&mut self.map);
        let mut current = self.head.take();
        self.tail = None;
        self.hand = None;

        while let Some(ptr) = current {
            // SAFETY: each node is reached exactly once from the old head and
            // nothing in `self` points at it any more.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            current = node.next;
        }
        drop(index);
    }

    /// Cheap structural check run after every mutation in debug builds.
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if self.map.is_empty() {
            debug_assert!(self.head.is_none(), "Empty cache should have no head");
            debug_assert!(self.tail.is_none(), "Empty cache should have no tail");
            debug_assert!(self.hand.is_none(), "Empty cache should have no hand");
            return;
        }
        debug_assert!(self.map.len() <= self.capacity, "Cache exceeds capacity");

        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(ptr) = current {
            count += 1;
            assert!(count <= self.map.len(), "Cycle detected in list");
            unsafe {
                let node = ptr.as_ref();
                debug_assert!(node.prev == prev, "Broken prev linkage");
                prev = Some(ptr);
                current = node.next;
            }
        }
        debug_assert!(self.tail == prev, "Tail is not the last node");
        debug_assert_eq!(count, self.map.len(), "List count doesn't match map size");
    }
}

impl<K, V> Drop for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn drop(&mut self) {
        self.free_all();
    }
}

impl<K, V> std::fmt::Debug for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SieveCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        SieveCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        SieveCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        SieveCache::contains(self, key)
    }

    #[inline]
    fn count(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        SieveCache::clear(self);
    }
}

impl<K, V> InspectCache<K, V> for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> Vec<EntrySnapshot<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.map.len());
        let mut current = self.head;
        while let Some(ptr) = current {
            // SAFETY: list nodes are live while &self is held.
            let node = unsafe { ptr.as_ref() };
            out.push(EntrySnapshot::new(
                node.key.clone(),
                node.value.clone(),
                node.visited,
            ));
            current = node.next;
        }
        out
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.is_empty() {
            if self.head.is_some() || self.tail.is_some() || self.hand.is_some() {
                return Err(InvariantError::new(
                    "empty cache still has head, tail or hand set",
                ));
            }
            return Ok(());
        }

        let mut seen = std::collections::HashSet::with_capacity(self.map.len());
        let mut hand_found = self.hand.is_none();
        let mut prev: Option<NonNull<Node<K, V>>> = None;
        let mut current = self.head;
        let mut position = 0usize;

        while let Some(ptr) = current {
            if !seen.insert(ptr) {
                return Err(InvariantError::new(format!(
                    "cycle detected at position {position}"
                )));
            }
            if seen.len() > self.map.len() {
                return Err(InvariantError::new(format!(
                    "list longer than index ({} entries)",
                    self.map.len()
                )));
            }
            // SAFETY: ptr was reached by following live links.
            let node = unsafe { ptr.as_ref() };
            if node.next == Some(ptr) || node.prev == Some(ptr) {
                return Err(InvariantError::new(format!(
                    "node at position {position} links to itself"
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "broken prev linkage at position {position}"
                )));
            }
            if self.map.get(&node.key) != Some(&ptr) {
                return Err(InvariantError::new(format!(
                    "index does not point at node at position {position}"
                )));
            }
            if self.hand == Some(ptr) {
                hand_found = true;
            }
            prev = Some(ptr);
            current = node.next;
            position += 1;
        }

        if self.tail != prev {
            return Err(InvariantError::new("tail is not the last node"));
        }
        if seen.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "list has {} nodes but index has {} keys",
                seen.len(),
                self.map.len()
            )));
        }
        if !hand_found {
            return Err(InvariantError::new("hand points outside the list"));
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> SieveMetricsSnapshot {
        SieveMetricsSnapshot::from_metrics(&self.metrics, self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> crate::metrics::traits::MetricsSnapshotProvider<SieveMetricsSnapshot>
    for SieveCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> SieveMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Clone + Eq + Hash, V: Clone>(cache: &SieveCache<K, V>) -> Vec<K> {
        cache.snapshot().into_iter().map(|e| e.key).collect()
    }

    fn visited<K: Clone + Eq + Hash, V: Clone>(cache: &SieveCache<K, V>) -> Vec<(K, bool)> {
        cache
            .snapshot()
            .into_iter()
            .map(|e| (e.key, e.visited))
            .collect()
    }

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: SieveCache<&str, i32> = SieveCache::new(10);
            assert!(cache.is_empty());
            assert_eq!(cache.count(), 0);
            assert_eq!(cache.capacity(), 10);
            assert_eq!(cache.hand(), None);
        }

        #[test]
        fn put_and_get() {
            let mut cache = SieveCache::new(10);
            cache.put("a", 1);
            cache.put("b", 2);

            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"b"), Some(&2));
            assert_eq!(cache.get(&"c"), None);
        }

        #[test]
        fn put_preserves_insertion_order() {
            let mut cache = SieveCache::new(3);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(3, 3);
            assert_eq!(keys(&cache), vec![3, 2, 1]);
        }

        #[test]
        fn update_returns_old_value_and_keeps_position() {
            let mut cache = SieveCache::new(3);
            cache.put(1, "a");
            cache.put(2, "b");
            assert_eq!(cache.put(1, "A"), Some("a"));
            assert_eq!(keys(&cache), vec![2, 1]);
            assert_eq!(cache.count(), 2);
        }

        #[test]
        fn get_miss_has_no_side_effect() {
            let mut cache = SieveCache::new(2);
            cache.put(1, 1);
            assert_eq!(cache.get(&99), None);
            assert_eq!(visited(&cache), vec![(1, false)]);
        }

        #[test]
        fn clear_removes_everything() {
            let mut cache = SieveCache::new(3);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.get(&1);
            cache.clear();

            assert!(cache.is_empty());
            assert!(!cache.contains(&1));
            assert_eq!(cache.hand(), None);
            cache.check_invariants().unwrap();

            cache.put(3, 3);
            assert_eq!(keys(&cache), vec![3]);
        }

        #[test]
        fn zero_capacity_is_rejected() {
            let err = SieveCache::<u32, u32>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = SieveCache::<u32, u32>::new(0);
        }
    }

    mod visited_bit {
        use super::*;

        #[test]
        fn get_marks_visited() {
            let mut cache = SieveCache::new(3);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.get(&1);
            assert_eq!(visited(&cache), vec![(2, false), (1, true)]);
        }

        #[test]
        fn put_on_existing_key_marks_visited_even_if_unchanged() {
            let mut cache = SieveCache::new(3);
            cache.put(1, 1);
            cache.put(1, 1);
            assert_eq!(visited(&cache), vec![(1, true)]);
        }

        #[test]
        fn contains_does_not_mark_visited() {
            let mut cache = SieveCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            for _ in 0..10 {
                assert!(cache.contains(&1));
            }
            assert_eq!(visited(&cache), vec![(2, false), (1, false)]);

            cache.put(3, 3);
            assert!(!cache.contains(&1));
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn evicts_oldest_when_nothing_visited() {
            let mut cache = SieveCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(3, 3);
            assert_eq!(keys(&cache), vec![3, 2]);
        }

        #[test]
        fn skips_visited_entry() {
            let mut cache = SieveCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.get(&1);
            cache.put(3, 3);

            assert_eq!(visited(&cache), vec![(3, false), (1, false)]);
        }

        #[test]
        fn full_scan_clears_all_bits() {
            let mut cache = SieveCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(3, 3);

            // Both demoted, scan wraps and evicts the tail.
            assert_eq!(visited(&cache), vec![(3, false), (2, false)]);
        }

        #[test]
        fn capacity_one_replaces_entry() {
            let mut cache = SieveCache::new(1);
            cache.put("a", 1);
            cache.get(&"a");
            cache.put("b", 2);
            assert!(!cache.contains(&"a"));
            assert_eq!(cache.get(&"b"), Some(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn repeated_eviction_stays_bounded() {
            let mut cache = SieveCache::new(4);
            for i in 0..200 {
                cache.put(i, i * 10);
                if i % 3 == 0 {
                    cache.get(&(i / 2));
                }
                assert!(cache.count() <= 4);
            }
            cache.check_invariants().unwrap();
        }
    }

    mod hand {
        use super::*;

        #[test]
        fn hand_rests_on_victims_prev() {
            let mut cache = SieveCache::new(4);
            for k in ["a", "b", "c", "d"] {
                cache.put(k, ());
            }
            cache.get(&"a");
            cache.get(&"b");
            cache.put("e", ());

            assert_eq!(keys(&cache), vec!["e", "d", "b", "a"]);
            assert_eq!(cache.hand(), Some(&"d"));
        }

        #[test]
        fn hand_cleared_when_victim_was_head() {
            let mut cache = SieveCache::new(2);
            cache.put(1, ());
            cache.put(2, ());
            cache.get(&1);
            cache.put(3, ());
            assert_eq!(cache.hand(), None);
        }
    }

    #[test]
    fn string_keys_and_values() {
        let mut cache = SieveCache::new(2);
        cache.put("hello".to_string(), "world".to_string());
        assert_eq!(
            cache.get(&"hello".to_string()),
            Some(&"world".to_string())
        );
        cache.check_invariants().unwrap();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_scan() {
        let mut cache = SieveCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.get(&1);
        cache.get(&7);
        cache.put(3, 3);

        let m = cache.metrics_snapshot();
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 1);
        assert_eq!(m.insert_new, 3);
        assert_eq!(m.evict_calls, 1);
        assert_eq!(m.evicted_entries, 1);
        assert_eq!(m.demotions, 1);
        assert_eq!(m.evict_scan_steps, 2);
        assert_eq!(m.cache_len, 2);
    }
}
