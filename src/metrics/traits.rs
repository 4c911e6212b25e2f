//! Recorder traits for cache metrics.
//!
//! ```text
//!         ┌─────────────────────────────┐
//!         │     CoreMetricsRecorder     │
//!         │  get_hit/get_miss/insert    │
//!         │  evict/clear                │
//!         └──────────────┬──────────────┘
//!                        │
//!                        ▼
//!         ┌─────────────────────────────┐
//!         │    SieveMetricsRecorder     │
//!         │  scan_step/demotion         │
//!         └─────────────────────────────┘
//! ```

/// Operations every cache records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// SIEVE-specific detail of the hand scan.
pub trait SieveMetricsRecorder: CoreMetricsRecorder {
    /// One entry examined by the hand during eviction.
    fn record_evict_scan_step(&mut self);
    /// One visited bit cleared by the hand.
    fn record_demotion(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
