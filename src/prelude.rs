pub use crate::actor::{ActorConfig, CacheActor, Pending};
pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentCache;
pub use crate::ds::{SlotArena, SlotId};
pub use crate::error::{ActorError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SieveMetricsSnapshot;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::sieve::SieveCache;
pub use crate::policy::sieve_arena::ArenaSieveCache;
pub use crate::traits::{CoreCache, EntrySnapshot, InspectCache};
