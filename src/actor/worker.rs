use crossbeam_channel::Receiver;
use tracing::{debug, trace};

use super::command::Command;
use crate::traits::{CoreCache, InspectCache};

/// Worker loop: owns the cache and applies commands in arrival order.
///
/// Returns once every sender is dropped and the queue is drained.
pub(crate) fn run<K, V, C>(mut cache: C, rx: Receiver<Command<K, V>>)
where
    K: Clone,
    V: Clone,
    C: CoreCache<K, V> + InspectCache<K, V>,
{
    debug!(capacity = cache.capacity(), "cache actor worker started");

    let mut processed: u64 = 0;
    while let Ok(cmd) = rx.recv() {
        trace!(command = cmd.kind(), "applying cache command");
        cmd.apply(&mut cache);
        processed += 1;
    }

    debug!(processed, len = cache.count(), "cache actor worker stopped");
}
