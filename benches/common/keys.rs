//! Seeded key streams for the hit-rate benches.
//!
//! Each stream is a plain `Iterator<Item = u64>`; the same pattern and seed
//! give every policy the same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sievekit::traits::CoreCache;

#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Uniform,
    /// `hot` keys receive `hot_share` of the accesses, the rest hit the
    /// whole universe.
    HotSet { hot: u64, hot_share: f64 },
    /// Hot-set traffic broken by a run of `scan_len` never-repeated keys at
    /// the start of every `period` accesses. Scan keys are one-hit wonders,
    /// so the hand should sweep them out before the hot set.
    ScanBurst { hot: u64, period: u64, scan_len: u64 },
    /// Rank-frequency power law; key 0 is the most popular.
    Zipf { exponent: f64 },
}

#[derive(Debug)]
pub struct KeyStream {
    pattern: Pattern,
    universe: u64,
    rng: StdRng,
    tick: u64,
    next_cold: u64,
    zipf_cdf: Vec<f64>,
}

impl KeyStream {
    pub fn new(pattern: Pattern, universe: u64, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipf_cdf = match pattern {
            Pattern::Zipf { exponent } => zipf_cdf(universe, exponent),
            _ => Vec::new(),
        };
        Self {
            pattern,
            universe,
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
            next_cold: 0,
            zipf_cdf,
        }
    }

    fn hot_key(&mut self, hot: u64) -> u64 {
        self.rng.gen_range(0..hot.clamp(1, self.universe))
    }
}

impl Iterator for KeyStream {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let tick = self.tick;
        self.tick += 1;

        let key = match self.pattern {
            Pattern::Uniform => self.rng.gen_range(0..self.universe),
            Pattern::HotSet { hot, hot_share } => {
                if self.rng.gen_bool(hot_share.clamp(0.0, 1.0)) {
                    self.hot_key(hot)
                } else {
                    self.rng.gen_range(0..self.universe)
                }
            },
            Pattern::ScanBurst {
                hot,
                period,
                scan_len,
            } => {
                if tick % period.max(1) < scan_len {
                    // above the universe, so never seen before
                    self.next_cold += 1;
                    self.universe + self.next_cold
                } else {
                    self.hot_key(hot)
                }
            },
            Pattern::Zipf { .. } => {
                let u: f64 = self.rng.gen();
                let rank = self.zipf_cdf.partition_point(|&c| c < u) as u64;
                rank.min(self.universe - 1)
            },
        };
        Some(key)
    }
}

fn zipf_cdf(universe: u64, exponent: f64) -> Vec<f64> {
    let weights: Vec<f64> = (1..=universe)
        .map(|rank| (rank as f64).powf(-exponent))
        .collect();
    let total: f64 = weights.iter().sum();
    let mut acc = 0.0;
    weights
        .into_iter()
        .map(|w| {
            acc += w / total;
            acc
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HitStats {
    pub hits: u64,
    pub misses: u64,
}

impl HitStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Reads `ops` keys from `keys`, inserting each miss.
pub fn replay<C>(cache: &mut C, keys: &mut KeyStream, ops: usize) -> HitStats
where
    C: CoreCache<u64, u64>,
{
    let mut stats = HitStats::default();
    for key in keys.take(ops) {
        if cache.get(&key).is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
            cache.put(key, key);
        }
    }
    stats
}
