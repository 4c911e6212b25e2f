//! Unified cache builder for all eviction policies.
//!
//! Picks a policy at runtime and hands back one [`Cache`] type that
//! dispatches to it, so callers (and the actor) can switch policies without
//! changing types.
//!
//! ## Example
//!
//! ```rust
//! use sievekit::builder::{CacheBuilder, CachePolicy};
//! use sievekit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Sieve);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::{ConfigError, InvariantError};
use crate::policy::fifo::FifoCache;
use crate::policy::lru::LruCache;
use crate::policy::sieve::SieveCache;
use crate::policy::sieve_arena::ArenaSieveCache;
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// SIEVE with pointer-linked nodes.
    #[default]
    Sieve,
    /// SIEVE over a preallocated slot arena.
    ArenaSieve,
    /// First In, First Out eviction.
    Fifo,
    /// Least Recently Used eviction.
    Lru,
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V>
where
    K: Clone + Eq + Hash,
{
    Sieve(SieveCache<K, V>),
    ArenaSieve(ArenaSieveCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lru(LruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Sieve(_) => CachePolicy::Sieve,
            CacheInner::ArenaSieve(_) => CachePolicy::ArenaSieve,
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Sieve(sieve) => sieve.put(key, value),
            CacheInner::ArenaSieve(arena) => arena.put(key, value),
            CacheInner::Fifo(fifo) => CoreCache::put(fifo, key, value),
            CacheInner::Lru(lru) => CoreCache::put(lru, key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Sieve(sieve) => sieve.get(key),
            CacheInner::ArenaSieve(arena) => arena.get(key),
            CacheInner::Fifo(fifo) => CoreCache::get(fifo, key),
            CacheInner::Lru(lru) => CoreCache::get(lru, key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Sieve(sieve) => sieve.contains(key),
            CacheInner::ArenaSieve(arena) => arena.contains(key),
            CacheInner::Fifo(fifo) => CoreCache::contains(fifo, key),
            CacheInner::Lru(lru) => CoreCache::contains(lru, key),
        }
    }

    fn count(&self) -> usize {
        match &self.inner {
            CacheInner::Sieve(sieve) => sieve.count(),
            CacheInner::ArenaSieve(arena) => arena.count(),
            CacheInner::Fifo(fifo) => CoreCache::count(fifo),
            CacheInner::Lru(lru) => CoreCache::count(lru),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Sieve(sieve) => sieve.capacity(),
            CacheInner::ArenaSieve(arena) => arena.capacity(),
            CacheInner::Fifo(fifo) => CoreCache::capacity(fifo),
            CacheInner::Lru(lru) => CoreCache::capacity(lru),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Sieve(sieve) => sieve.clear(),
            CacheInner::ArenaSieve(arena) => arena.clear(),
            CacheInner::Fifo(fifo) => CoreCache::clear(fifo),
            CacheInner::Lru(lru) => CoreCache::clear(lru),
        }
    }
}

impl<K, V> InspectCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> Vec<EntrySnapshot<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        match &self.inner {
            CacheInner::Sieve(sieve) => sieve.snapshot(),
            CacheInner::ArenaSieve(arena) => arena.snapshot(),
            CacheInner::Fifo(fifo) => fifo.snapshot(),
            CacheInner::Lru(lru) => lru.snapshot(),
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Sieve(sieve) => sieve.check_invariants(),
            CacheInner::ArenaSieve(arena) => arena.check_invariants(),
            CacheInner::Fifo(fifo) => fifo.check_invariants(),
            CacheInner::Lru(lru) => lru.check_invariants(),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. Use [`try_build`](Self::try_build) for
    /// user-supplied capacities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sievekit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let sieve = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Sieve);
    /// let arena = CacheBuilder::new(100).build::<u64, String>(CachePolicy::ArenaSieve);
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build a cache, returning [`ConfigError`] for zero capacity.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Sieve => CacheInner::Sieve(SieveCache::try_new(self.capacity)?),
            CachePolicy::ArenaSieve => {
                CacheInner::ArenaSieve(ArenaSieveCache::try_new(self.capacity)?)
            },
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::try_new(self.capacity)?),
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
        };

        Ok(Cache { inner })
    }
}
