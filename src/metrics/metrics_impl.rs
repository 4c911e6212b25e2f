use crate::metrics::traits::{CoreMetricsRecorder, SieveMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct SieveMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64,
    pub demotions: u64,
    pub clear_calls: u64,
}

impl CoreMetricsRecorder for SieveMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl SieveMetricsRecorder for SieveMetrics {
    fn record_evict_scan_step(&mut self) {
        self.evict_scan_steps += 1;
    }
    fn record_demotion(&mut self) {
        self.demotions += 1;
    }
}
