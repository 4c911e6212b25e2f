//! Eviction policies.
//!
//! | Module          | Type              | Eviction                                 |
//! |-----------------|-------------------|------------------------------------------|
//! | [`sieve`]       | `SieveCache`      | SIEVE over heap-allocated linked nodes   |
//! | [`sieve_arena`] | `ArenaSieveCache` | SIEVE over a fixed slot arena            |
//! | [`fifo`]        | `FifoCache`       | oldest insert, hits ignored              |
//! | [`lru`]         | `LruCache`        | least recently used, hits move to head   |

pub mod fifo;
pub mod lru;
pub mod sieve;
pub mod sieve_arena;
