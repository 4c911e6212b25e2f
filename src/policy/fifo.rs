//! First-In-First-Out baseline.
//!
//! Evicts the oldest inserted entry regardless of access. Hits never change
//! eviction order, so FIFO is the floor SIEVE is measured against: SIEVE is
//! FIFO plus one visited bit and a hand.
//!
//! ```text
//!   order: VecDeque<K>          map: FxHashMap<K, V>
//!
//!   front (oldest) ──► [A] [B] [C] [D] ◄── back (newest)
//!                       ▲
//!                       └── next victim
//! ```
//!
//! `get` and `put` on an existing key leave `order` untouched.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

#[derive(Debug)]
pub struct FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> FifoCache<K, V>
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
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Key that the next insert of a new key would evict, if full.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.front()
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.map.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.map.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.map.insert(key, value);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn count(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> InspectCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> Vec<EntrySnapshot<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        // newest first, matching the SIEVE head-to-tail order
        self.order
            .iter()
            .rev()
            .filter_map(|key| {
                self.map
                    .get(key)
                    .map(|value| EntrySnapshot::new(key.clone(), value.clone(), false))
            })
            .collect()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.order.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "queue holds {} keys but map holds {}",
                self.order.len(),
                self.map.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new("fifo cache over capacity"));
        }
        if let Some(missing) = self.order.iter().position(|k| !self.map.contains_key(k)) {
            return Err(InvariantError::new(format!(
                "queue position {missing} has no map entry"
            )));
        }
        Ok(())
    }
}
