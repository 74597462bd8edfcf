use super::{Cpu, Policy, PolicyKind, RankBy, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

// Non-preemptive: ranking only matters when the processor frees up
pub struct SjfScheduler {
    cpu: Cpu,
    waiting: RunQueue,
}

impl Policy for SjfScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            waiting: RunQueue::new_priq(RankBy::JobTime),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Sjf
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        if self.cpu.is_idle() {
            return self.cpu.start(ctx, job);
        }
        self.waiting.push(job);
        Ok(())
    }

    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job> {
        let done = self
            .cpu
            .finish(ctx.now())
            .ok_or(SimError::SpuriousCompletion { policy: self.kind() })?;

        if let Some(shortest) = self.waiting.pop() {
            self.cpu.start(ctx, shortest)?;
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
