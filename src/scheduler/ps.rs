use std::collections::VecDeque;

use super::{Policy, PolicyKind, SchedCtx};
use crate::{
    core::Ticks,
    error::{Result, SimError},
    sim::Job,
};

/// Processor sharing: every admitted job gets an equal slice of the
/// processor at all times.
///
/// Service is settled lazily. At each event the time elapsed since
/// `last_epoch` is split evenly across the active jobs; the units that do
/// not divide evenly go one each to the earliest admitted jobs. The next
/// completion is when the job with the least work left reaches zero, i.e.
/// `time_to_run * active.len()` from now.
///
/// Jobs that hit zero together are parked in `finished` and handed out one
/// per completion event, each re-armed at the same timestamp.
#[derive(Debug, Default)]
pub struct PsScheduler {
    active: Vec<Job>,
    finished: VecDeque<Job>,
    last_epoch: Ticks,
    time_to_run: Ticks,
    remainder: Ticks,
}

impl PsScheduler {
    pub fn time_to_run(&self) -> Ticks {
        self.time_to_run
    }

    /// Units of the last settled interval that did not split evenly.
    pub fn remainder(&self) -> Ticks {
        self.remainder
    }

    fn credit(&mut self, now: Ticks) {
        let elapsed = now - self.last_epoch;
        self.last_epoch = now;

        let n = self.active.len() as Ticks;
        if n == 0 {
            self.remainder = 0;
            return;
        }

        let share = elapsed / n;
        self.remainder = elapsed % n;
        for (i, job) in self.active.iter_mut().enumerate() {
            let extra = Ticks::from((i as Ticks) < self.remainder);
            job.charge(share + extra);
        }
    }

    fn collect_finished(&mut self) {
        let (done, live): (Vec<Job>, Vec<Job>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(Job::is_complete);
        self.active = live;
        self.finished.extend(done);
    }

    fn reschedule(&mut self, ctx: &mut SchedCtx<'_>) -> Result<()> {
        if ctx.pending_completion().is_some() {
            ctx.cancel_next_completion()?;
        }

        let now = ctx.now();
        if !self.finished.is_empty() {
            ctx.schedule_next_completion(now)?;
            return Ok(());
        }

        let Some(min) = self.active.iter().map(Job::remaining_time).min() else {
            self.time_to_run = 0;
            self.remainder = 0;
            return Ok(());
        };

        self.time_to_run = min;
        let n = self.active.len() as Ticks;
        let delta = min
            .checked_mul(n)
            .ok_or(SimError::ClockOverflow {
                now,
                delta: min.saturating_mul(n),
            })?;
        tracing::debug!(t = now, jobs = n, quantum = min, "PS quantum");
        ctx.schedule_completion_in(delta)?;
        Ok(())
    }
}

impl Policy for PsScheduler {
    fn init() -> Self {
        Self::default()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Ps
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        self.credit(ctx.now());
        self.active.push(job);
        self.collect_finished();
        self.reschedule(ctx)
    }

    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job> {
        self.credit(ctx.now());
        self.collect_finished();

        let done = self
            .finished
            .pop_front()
            .ok_or(SimError::SpuriousCompletion { policy: self.kind() })?;
        self.reschedule(ctx)?;
        Ok(done)
    }

    fn exit(&mut self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.finished.drain(..).collect();
        jobs.append(&mut self.active);
        jobs
    }

    fn len(&self) -> usize {
        self.active.len() + self.finished.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;

    fn remaining(ps: &PsScheduler) -> Vec<Ticks> {
        ps.active.iter().map(Job::remaining_time).collect()
    }

    #[test]
    fn even_split() {
        let mut ps = PsScheduler::init();
        ps.active = vec![Job::new(1, 0, 4), Job::new(2, 0, 6)];

        ps.credit(8);
        assert_eq!(remaining(&ps), [0, 2]);
        assert_eq!(ps.remainder(), 0);
        assert_eq!(ps.last_epoch, 8);
    }

    #[test]
    fn leftover_units_go_to_earliest_jobs() {
        let mut ps = PsScheduler::init();
        ps.active = vec![Job::new(1, 0, 6), Job::new(2, 0, 6), Job::new(3, 0, 6)];

        ps.credit(5);
        assert_eq!(ps.remainder(), 2);
        assert_eq!(remaining(&ps), [4, 4, 5]);

        // No service is lost to truncation
        let served: Ticks = ps.active.iter().map(Job::completed_time).sum();
        assert_eq!(served, 5);
    }

    #[test]
    fn idle_credit_only_moves_epoch() {
        let mut ps = PsScheduler::init();
        ps.credit(12);
        assert_eq!(ps.last_epoch, 12);
        assert_eq!(ps.remainder(), 0);
    }

    #[test]
    fn finished_jobs_leave_in_admission_order() {
        let mut ps = PsScheduler::init();
        ps.active = vec![Job::new(1, 0, 2), Job::new(2, 0, 5), Job::new(3, 0, 2)];
        ps.credit(6);
        ps.collect_finished();

        let done: Vec<_> = ps.finished.iter().map(Job::id).collect();
        assert_eq!(done, [1, 3]);
        assert_eq!(remaining(&ps), [3]);
        assert_eq!(ps.len(), 3);
    }

    #[test]
    fn quantum_is_smallest_remaining_scaled_by_sharers() {
        let mut queue = EventQueue::new();
        let mut completion = None;
        let mut ps = PsScheduler::init();

        let mut ctx = SchedCtx::new(&mut queue, &mut completion);
        ps.on_arrival(&mut ctx, Job::new(1, 0, 7)).unwrap();
        assert_eq!(ps.time_to_run(), 7);
        ps.on_arrival(&mut ctx, Job::new(2, 0, 3)).unwrap();
        assert_eq!(ps.time_to_run(), 3);

        // Only the re-armed completion is left in the queue
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_key().unwrap().timestamp, 6);
    }

    #[test]
    fn quantum_past_the_end_of_time_fails() {
        let mut queue = EventQueue::new();
        let mut completion = None;
        let mut ps = PsScheduler::init();
        let half = u64::MAX / 2 + 1;

        let mut ctx = SchedCtx::new(&mut queue, &mut completion);
        ps.on_arrival(&mut ctx, Job::new(1, 0, half)).unwrap();
        let err = ps.on_arrival(&mut ctx, Job::new(2, 0, half)).unwrap_err();
        assert!(matches!(err, SimError::ClockOverflow { now: 0, .. }));
    }
}
