//! sievekit: SIEVE cache eviction in two memory layouts, plus a
//! message-passing actor for sharing one cache across threads.
//!
//! | Entry point                                         | Use                                   |
//! |-----------------------------------------------------|---------------------------------------|
//! | [`SieveCache`](policy::sieve::SieveCache)           | single-threaded, node per entry       |
//! | [`ArenaSieveCache`](policy::sieve_arena::ArenaSieveCache) | single-threaded, fixed slot arena |
//! | [`CacheBuilder`](builder::CacheBuilder)             | pick a policy at runtime              |
//! | [`CacheActor`](actor::CacheActor)                   | many callers, one worker thread       |
//! | `ConcurrentCache` (`concurrency` feature)           | many callers, one mutex               |
//!
//! ```
//! use sievekit::prelude::*;
//!
//! let mut cache = SieveCache::new(3);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! assert!(cache.contains(&"a"));
//! ```

pub mod actor;
pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;
