//! Error types for the sievekit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//! - [`ActorError`]: Returned by [`CacheActor`](crate::actor::CacheActor)
//!   result handles when a command could not be completed.
//!
//! ## Example Usage
//!
//! ```
//! use sievekit::error::ConfigError;
//! use sievekit::policy::sieve::SieveCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<SieveCache<String, i32>, ConfigError> = SieveCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = SieveCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on cache types
/// (e.g. [`InspectCache::check_invariants`](crate::traits::InspectCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`SieveCache::try_new`](crate::policy::sieve::SieveCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use sievekit::policy::sieve_arena::ArenaSieveCache;
///
/// let err = ArenaSieveCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ActorError
// ---------------------------------------------------------------------------

/// Error resolved into an actor command's result handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// The worker is gone: the queue is disconnected or the result slot was
    /// dropped before being resolved.
    WorkerClosed,
    /// Applying this command panicked. The worker caught the panic and kept
    /// serving other commands.
    CommandPanicked(String),
    /// The worker thread could not be started.
    Spawn(String),
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorError::WorkerClosed => f.write_str("cache actor worker is closed"),
            ActorError::CommandPanicked(msg) => write!(f, "cache command panicked: {msg}"),
            ActorError::Spawn(msg) => write!(f, "failed to spawn cache actor worker: {msg}"),
        }
    }
}

impl std::error::Error for ActorError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
