use std::{cmp::Ordering, collections::VecDeque};

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;

use crate::{core::Ticks, sim::Job};

/// Which job field a priority queue ranks on. Smaller runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    JobTime,
    RemainingTime,
}

impl RankBy {
    fn of(self, job: &Job) -> Ticks {
        match self {
            Self::JobTime => job.job_time(),
            Self::RemainingTime => job.remaining_time(),
        }
    }
}

/// Priority of a waiting job: rank value, then arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub value: Ticks,
    pub arrival: (Ticks, u64),
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .cmp(&self.value)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

/// Jobs waiting for the processor.
#[derive(Debug)]
pub enum RunQueue {
    Fifo {
        jobs: VecDeque<Job>,
    },
    Lifo {
        jobs: Vec<Job>,
    },
    Priq {
        rank_by: RankBy,
        ranks: KeyedPriorityQueue<u64, Rank>,
        jobs: FxHashMap<u64, Job>,
        next_slot: u64,
    },
}

impl RunQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            jobs: VecDeque::new(),
        }
    }

    pub fn new_lifo() -> Self {
        Self::Lifo { jobs: Vec::new() }
    }

    pub fn new_priq(rank_by: RankBy) -> Self {
        Self::Priq {
            rank_by,
            ranks: KeyedPriorityQueue::new(),
            jobs: FxHashMap::default(),
            next_slot: 0,
        }
    }

    pub fn push(&mut self, job: Job) {
        match self {
            Self::Fifo { jobs } => jobs.push_back(job),
            Self::Lifo { jobs } => jobs.push(job),
            Self::Priq {
                rank_by,
                ranks,
                jobs,
                next_slot,
            } => {
                // Slots only key the job table; the rank carries the order
                let slot = *next_slot;
                *next_slot += 1;
                ranks.push(
                    slot,
                    Rank {
                        value: rank_by.of(&job),
                        arrival: job.arrival_order(),
                    },
                );
                jobs.insert(slot, job);
            }
        }
    }

    /// Remove the job that should run next.
    pub fn pop(&mut self) -> Option<Job> {
        match self {
            Self::Fifo { jobs } => jobs.pop_front(),
            Self::Lifo { jobs } => jobs.pop(),
            Self::Priq { ranks, jobs, .. } => {
                let (slot, _) = ranks.pop()?;
                let job = jobs.remove(&slot);
                debug_assert!(job.is_some(), "Ranked job {slot} missing from table");
                job
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { jobs } => jobs.len(),
            Self::Lifo { jobs } => jobs.len(),
            Self::Priq { jobs, .. } => jobs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty the queue, in no particular order.
    pub fn drain(&mut self) -> Vec<Job> {
        match self {
            Self::Fifo { jobs } => jobs.drain(..).collect(),
            Self::Lifo { jobs } => std::mem::take(jobs),
            Self::Priq { ranks, jobs, .. } => {
                ranks.clear();
                jobs.drain().map(|(_, job)| job).collect()
            }
        }
    }
}
