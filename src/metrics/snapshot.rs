#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SieveMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64, // entries the hand examined, victims included
    pub demotions: u64,        // visited bits cleared by the hand

    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl SieveMetricsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    pub(crate) fn from_metrics(
        metrics: &crate::metrics::SieveMetrics,
        cache_len: usize,
        capacity: usize,
    ) -> Self {
        Self {
            get_calls: metrics.get_calls,
            get_hits: metrics.get_hits,
            get_misses: metrics.get_misses,
            insert_calls: metrics.insert_calls,
            insert_updates: metrics.insert_updates,
            insert_new: metrics.insert_new,
            evict_calls: metrics.evict_calls,
            evicted_entries: metrics.evicted_entries,
            evict_scan_steps: metrics.evict_scan_steps,
            demotions: metrics.demotions,
            clear_calls: metrics.clear_calls,
            cache_len,
            capacity,
        }
    }
}
