//! Per-cache operation counters (feature `metrics`).
//!
//! Recording, snapshotting and reading are kept apart:
//! [`traits`] defines the recorder interface the caches call into,
//! [`metrics_impl`] holds the plain counter struct, and [`snapshot`] is the
//! copyable view returned by `metrics_snapshot()`.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::SieveMetrics;
pub use snapshot::SieveMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsSnapshotProvider, SieveMetricsRecorder};
