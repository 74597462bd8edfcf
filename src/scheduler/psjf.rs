use super::{Cpu, Policy, PolicyKind, RankBy, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

/// Preemptive shortest job first.
///
/// Waiting jobs are ranked by their total size, ties going to the earlier
/// arrival. An arrival takes the processor only if its size is strictly
/// smaller than what the running job still needs right now.
pub struct PsjfScheduler {
    cpu: Cpu,
    waiting: RunQueue,
}

impl Policy for PsjfScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            waiting: RunQueue::new_priq(RankBy::JobTime),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Psjf
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        let Some(running_left) = self.cpu.remaining_at(ctx.now()) else {
            return self.cpu.start(ctx, job);
        };

        if job.job_time() < running_left {
            if let Some(preempted) = self.cpu.preempt(ctx)? {
                self.waiting.push(preempted);
            }
            self.cpu.start(ctx, job)
        } else {
            self.waiting.push(job);
            Ok(())
        }
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
