//! # Least Recently Used (LRU) baseline
//!
//! Recency-ordered cache used as a comparison point for SIEVE. Every hit
//! moves the entry to the head, which is exactly the per-hit list surgery
//! SIEVE avoids by flipping a bit instead.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, SlotId>         arena: SlotArena<Entry<K, V>>
//!
//!   head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail
//!    (MRU)   │ slot │      │ slot │      │ slot │   (LRU)
//!            └──────┘      └──────┘      └──────┘
//!
//!   get(k) hit:   detach(k), attach at head
//!   put(new):     if full, pop tail; attach at head
//! ```
//!
//! Entries share the fixed [`SlotArena`] used by
//! [`ArenaSieveCache`](crate::policy::sieve_arena::ArenaSieveCache), so
//! comparisons between the two isolate the policy rather than the allocator.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

#[derive(Debug)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    key: K,
    value: V,
}

#[derive(Debug)]
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    arena: SlotArena<Entry<K, V>>,
    map: FxHashMap<K, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(Self {
            arena: SlotArena::with_capacity(capacity),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        })
    }

    /// Looks up `key` without promoting it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = self.map.get(key)?;
        self.arena.get(*id).map(|entry| &entry.value)
    }

    /// Least recently used entry; the next eviction victim.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let entry = self.arena.get(self.tail?)?;
        Some((&entry.key, &entry.value))
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

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(entry) => {
                entry.prev = None;
                entry.next = old_head;
            },
            None => return,
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head) => head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn pop_tail(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        self.detach(id);
        let entry = self.arena.remove(id)?;
        self.map.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            self.detach(id);
            self.attach_front(id);
            return self
                .arena
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.arena.is_full() {
            self.pop_tail();
        }
        let entry = Entry {
            prev: None,
            next: None,
            key: key.clone(),
            value,
        };
        if let Ok(id) = self.arena.insert(entry) {
            self.map.insert(key, id);
            self.attach_front(id);
        }
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        if self.head != Some(id) {
            self.detach(id);
            self.attach_front(id);
        }
        self.arena.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn count(&self) -> usize {
        self.arena.len()
    }

    fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.map.clear();
        self.head = None;
        self.tail = None;
    }
}

impl<K, V> InspectCache<K, V> for LruCache<K, V>
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
                false,
            ));
            current = entry.next;
        }
        out
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.arena.check_invariants()?;
        if self.map.len() != self.arena.len() {
            return Err(InvariantError::new("lru index and arena disagree on len"));
        }

        let mut walked = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            walked += 1;
            if walked > self.arena.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            let entry = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("recency list links to free slot {}", id.index()))
            })?;
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "broken prev linkage at slot {}",
                    id.index()
                )));
            }
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index does not point at slot {}",
                    id.index()
                )));
            }
            prev = Some(id);
            current = entry.next;
        }
        if self.tail != prev {
            return Err(InvariantError::new("tail is not the last entry"));
        }
        if walked != self.arena.len() {
            return Err(InvariantError::new("recency list is missing entries"));
        }
        Ok(())
    }
}
