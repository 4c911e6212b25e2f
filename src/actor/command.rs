use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tokio::sync::oneshot;
use tracing::error;

use crate::error::{ActorError, InvariantError};
use crate::traits::{CoreCache, EntrySnapshot, InspectCache};

type Reply<T> = oneshot::Sender<Result<T, ActorError>>;

/// Command sent from a [`CacheActor`](super::CacheActor) handle to its worker.
pub(crate) enum Command<K, V> {
    Get {
        key: K,
        tx: Reply<Option<V>>,
    },
    Put {
        key: K,
        value: V,
        tx: Reply<Option<V>>,
    },
    Contains {
        key: K,
        tx: Reply<bool>,
    },
    Clear {
        tx: Reply<()>,
    },
    Count {
        tx: Reply<usize>,
    },
    Snapshot {
        tx: Reply<Vec<EntrySnapshot<K, V>>>,
    },
    CheckInvariants {
        tx: Reply<Result<(), InvariantError>>,
    },
}

impl<K, V> Command<K, V>
where
    K: Clone,
    V: Clone,
{
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Get { .. } => "get",
            Command::Put { .. } => "put",
            Command::Contains { .. } => "contains",
            Command::Clear { .. } => "clear",
            Command::Count { .. } => "count",
            Command::Snapshot { .. } => "snapshot",
            Command::CheckInvariants { .. } => "check_invariants",
        }
    }

    /// Runs the command against `cache` and resolves its reply.
    ///
    /// A panic inside the cache is caught and delivered as
    /// [`ActorError::CommandPanicked`]; the caller keeps serving.
    pub fn apply<C>(self, cache: &mut C)
    where
        C: CoreCache<K, V> + InspectCache<K, V>,
    {
        let kind = self.kind();
        // A dropped receiver means the caller stopped waiting; nothing to do.
        match self {
            Command::Get { key, tx } => {
                let _ = tx.send(guarded(kind, || cache.get(&key).cloned()));
            },
            Command::Put { key, value, tx } => {
                let _ = tx.send(guarded(kind, || cache.put(key, value)));
            },
            Command::Contains { key, tx } => {
                let _ = tx.send(guarded(kind, || cache.contains(&key)));
            },
            Command::Clear { tx } => {
                let _ = tx.send(guarded(kind, || cache.clear()));
            },
            Command::Count { tx } => {
                let _ = tx.send(guarded(kind, || cache.count()));
            },
            Command::Snapshot { tx } => {
                let _ = tx.send(guarded(kind, || cache.snapshot()));
            },
            Command::CheckInvariants { tx } => {
                let _ = tx.send(guarded(kind, || cache.check_invariants()));
            },
        }
    }
}

fn guarded<T>(kind: &'static str, f: impl FnOnce() -> T) -> Result<T, ActorError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let msg = panic_message(payload.as_ref());
        error!(command = kind, panic = %msg, "cache command panicked");
        ActorError::CommandPanicked(msg)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
