use rand::prelude::*;

use super::Job;
use crate::core::Ticks;

/// Synthetic arrival process with a two-point size distribution.
///
/// On each tick a burst lands with probability `p_burst` and carries
/// between one and `max_burst` jobs, all sharing that arrival time. A job is
/// short with probability `p_short`, long otherwise. Ids follow generation
/// order, so equal arrival times are listed in id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub ticks: Ticks,
    pub p_burst: f64,
    pub max_burst: u64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            ticks: 400,
            p_burst: 0.3,
            max_burst: 1,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
        }
    }
}

impl Workload {
    pub fn with_bursts(mut self, max_burst: u64) -> Self {
        self.max_burst = max_burst;
        self
    }

    pub fn with_sizes(mut self, short_ticks: Ticks, long_ticks: Ticks) -> Self {
        self.short_ticks = short_ticks;
        self.long_ticks = long_ticks;
        self
    }

    /// Same seed, same trace.
    pub fn generate(&self, seed: u64) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut jobs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() >= self.p_burst {
                continue;
            }
            let burst = rng.random_range(1..=self.max_burst.max(1));
            for _ in 0..burst {
                let job_time = if rng.random::<f64>() < self.p_short {
                    self.short_ticks
                } else {
                    self.long_ticks
                };
                jobs.push(Job::new(jobs.len() as u64, t, job_time));
            }
        }

        jobs
    }
}
