use super::{Cpu, Policy, PolicyKind, RankBy, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

/// Shortest remaining processing time.
///
/// A job's remaining time only changes while it holds the processor, and it
/// is charged before it goes back to the queue, so ranks taken at push time
/// stay correct while the job waits.
pub struct SrptScheduler {
    cpu: Cpu,
    waiting: RunQueue,
}

impl Policy for SrptScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            waiting: RunQueue::new_priq(RankBy::RemainingTime),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Srpt
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        let preempts = match self.cpu.remaining_at(ctx.now()) {
            None => true,
            Some(running_left) => job.remaining_time() < running_left,
        };

        if !preempts {
            self.waiting.push(job);
            return Ok(());
        }

        if let Some(preempted) = self.cpu.preempt(ctx)? {
            self.waiting.push(preempted);
        }
        self.cpu.start(ctx, job)
    }

    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job> {
        let done = self
            .cpu
            .finish(ctx.now())
            .ok_or(SimError::SpuriousCompletion { policy: self.kind() })?;

        if let Some(next) = self.waiting.pop() {
            self.cpu.start(ctx, next)?;
        }
        Ok(done)
    }

    fn exit(&mut self) -> Vec<Job> {
        let mut jobs = self.waiting.drain();
        jobs.extend(self.cpu.clear());
        jobs
    }

    fn len(&self) -> usize {
        self.waiting.len() + usize::from(!self.cpu.is_idle())
    }
}
