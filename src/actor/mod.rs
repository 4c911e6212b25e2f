//! Message-passing front end for a single-threaded cache.
//!
//! A [`CacheActor`] owns one cache on a dedicated worker thread. Handles
//! submit commands over an unbounded channel and each call returns a
//! [`Pending`] result handle immediately: the command is enqueued at call
//! time, before the handle is awaited.
//!
//! ```text
//!   caller threads / tasks                        worker thread
//!   ┌──────────────┐                              ┌──────────────────────┐
//!   │ actor.get(k) │──┐                           │ loop {               │
//!   ├──────────────┤  │   crossbeam unbounded     │   cmd = rx.recv()    │
//!   │ actor.put()  │──┼──► [cmd][cmd][cmd] ──────►│   catch_unwind(apply)│
//!   ├──────────────┤  │        (FIFO)             │   tx.send(result)    │
//!   │ actor.count()│──┘                           │ }                    │
//!   └──────┬───────┘                              └──────────┬───────────┘
//!          │            oneshot per command                  │
//!          └◄────────────────────────────────────────────────┘
//!            Pending<T>: .await  or  .wait()
//! ```
//!
//! Commands are applied one at a time in the order they were enqueued. A
//! command that panics inside the cache resolves its own handle with
//! [`ActorError::CommandPanicked`] and the worker moves on to the next one.
//!
//! The worker exits once the last handle is dropped and the queue drains.
//!
//! # Example
//!
//! ```
//! use sievekit::actor::CacheActor;
//! use sievekit::policy::sieve::SieveCache;
//!
//! let actor = CacheActor::spawn(SieveCache::new(128)).unwrap();
//!
//! // enqueued now, observed later
//! let put = actor.put("a", 1);
//! let get = actor.get("a");
//!
//! assert_eq!(put.wait(), Ok(None));
//! assert_eq!(get.wait(), Ok(Some(1)));
//! ```

mod command;
mod pending;
mod worker;

use std::fmt;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{ActorError, InvariantError};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

use self::command::Command;
pub use self::pending::Pending;

/// Worker thread name used when none is configured.
pub const DEFAULT_THREAD_NAME: &str = "sieve-actor";

/// Worker settings for [`CacheActor::spawn_with_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorConfig {
    /// Name given to the worker thread.
    pub thread_name: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl ActorConfig {
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Cloneable handle to a cache owned by a worker thread.
///
/// All clones feed the same queue. Values come back by clone since the cache
/// never leaves the worker.
pub struct CacheActor<K, V> {
    inner: Arc<ActorInner<K, V>>,
}

struct ActorInner<K, V> {
    tx: Sender<Command<K, V>>,
    thread_name: String,
}

impl<K, V> Clone for CacheActor<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for CacheActor<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheActor")
            .field("thread_name", &self.inner.thread_name)
            .field("queued", &self.inner.tx.len())
            .finish()
    }
}

impl<K, V> CacheActor<K, V>
where
    K: Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Moves `cache` onto a new worker thread with the default config.
    pub fn spawn<C>(cache: C) -> Result<Self, ActorError>
    where
        C: CoreCache<K, V> + InspectCache<K, V> + Send + 'static,
    {
        Self::spawn_with_config(cache, ActorConfig::default())
    }

    /// Moves `cache` onto a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Spawn`] if the OS refuses to start the thread.
    pub fn spawn_with_config<C>(cache: C, config: ActorConfig) -> Result<Self, ActorError>
    where
        C: CoreCache<K, V> + InspectCache<K, V> + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded::<Command<K, V>>();

        thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker::run(cache, rx))
            .map_err(|e| ActorError::Spawn(e.to_string()))?;

        debug!(thread = %config.thread_name, "spawned cache actor");

        Ok(Self {
            inner: Arc::new(ActorInner {
                tx,
                thread_name: config.thread_name,
            }),
        })
    }
}

impl<K, V> CacheActor<K, V> {
    fn submit<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, ActorError>>) -> Command<K, V>,
    ) -> Pending<T> {
        let (tx, rx) = oneshot::channel();
        // On a closed queue the command, and its reply sender with it, is
        // dropped here, so the handle resolves to WorkerClosed.
        let _ = self.inner.tx.send(make(tx));
        Pending::new(rx)
    }

    /// Looks up `key`, marking the entry visited. Resolves to a clone of the value.
    pub fn get(&self, key: K) -> Pending<Option<V>> {
        self.submit(|tx| Command::Get { key, tx })
    }

    /// Inserts or updates `key`. Resolves to the replaced value, if any.
    pub fn put(&self, key: K, value: V) -> Pending<Option<V>> {
        self.submit(|tx| Command::Put { key, value, tx })
    }

    /// Checks membership without touching the visited bit.
    pub fn contains(&self, key: K) -> Pending<bool> {
        self.submit(|tx| Command::Contains { key, tx })
    }

    pub fn clear(&self) -> Pending<()> {
        self.submit(|tx| Command::Clear { tx })
    }

    pub fn count(&self) -> Pending<usize> {
        self.submit(|tx| Command::Count { tx })
    }

    /// Head-to-tail entries as seen by the worker when the command runs.
    pub fn snapshot(&self) -> Pending<Vec<EntrySnapshot<K, V>>> {
        self.submit(|tx| Command::Snapshot { tx })
    }

    /// Runs the cache's structural check on the worker.
    pub fn check_invariants(&self) -> Pending<Result<(), InvariantError>> {
        self.submit(|tx| Command::CheckInvariants { tx })
    }

    /// Commands enqueued but not yet picked up by the worker.
    pub fn queued(&self) -> usize {
        self.inner.tx.len()
    }

    pub fn thread_name(&self) -> &str {
        &self.inner.thread_name
    }
}
