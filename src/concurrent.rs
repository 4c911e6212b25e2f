//! Thread-safe cache wrapper using a single `parking_lot::Mutex`.
//!
//! The lock-based alternative to [`CacheActor`](crate::actor::CacheActor).
//! A SIEVE `get` writes the visited bit, so even reads need exclusive access;
//! a `Mutex` is used rather than an `RwLock` for that reason.
//!
//! Values are returned by clone (or through a closure with
//! [`get_with`](ConcurrentCache::get_with)) because a reference cannot
//! outlive the guard.
//!
//! # Example
//!
//! ```
//! use sievekit::concurrent::ConcurrentCache;
//! use sievekit::policy::sieve::SieveCache;
//!
//! let cache = ConcurrentCache::new(SieveCache::new(100));
//!
//! let writer = cache.clone();
//! std::thread::spawn(move || {
//!     writer.put("key", 1);
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.get(&"key"), Some(1));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::InvariantError;
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

/// Shared handle to a cache behind one mutex. Clones share the cache.
#[derive(Debug)]
pub struct ConcurrentCache<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for ConcurrentCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> ConcurrentCache<C> {
    /// Wraps an existing cache.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Keeps several operations atomic with respect to other handles.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn put<K, V>(&self, key: K, value: V) -> Option<V>
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().put(key, value)
    }

    /// Gets a cloned value, marking the entry visited.
    pub fn get<K, V>(&self, key: &K) -> Option<V>
    where
        C: CoreCache<K, V>,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Gets a value and applies `f` to it while the lock is held.
    ///
    /// ```
    /// use sievekit::concurrent::ConcurrentCache;
    /// use sievekit::policy::sieve_arena::ArenaSieveCache;
    ///
    /// let cache = ConcurrentCache::new(ArenaSieveCache::new(10));
    /// cache.put("key".to_string(), vec![1, 2, 3]);
    ///
    /// let len = cache.get_with(&"key".to_string(), |v: &Vec<i32>| v.len());
    /// assert_eq!(len, Some(3));
    /// ```
    pub fn get_with<K, V, R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().get(key).map(f)
    }

    pub fn contains<K, V>(&self, key: &K) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().contains(key)
    }

    pub fn count<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().count()
    }

    pub fn capacity<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().capacity()
    }

    pub fn clear<K, V>(&self)
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().clear()
    }

    pub fn snapshot<K, V>(&self) -> Vec<EntrySnapshot<K, V>>
    where
        C: InspectCache<K, V>,
        K: Clone,
        V: Clone,
    {
        self.inner.lock().snapshot()
    }

    pub fn check_invariants<K, V>(&self) -> Result<(), InvariantError>
    where
        C: InspectCache<K, V>,
    {
        self.inner.lock().check_invariants()
    }
}
