use super::{Cpu, Policy, PolicyKind, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

/// First come, first served. Arrivals are dispatched in arrival order, so a
/// plain FIFO keeps the waiting jobs sorted by arrival time.
pub struct FcfsScheduler {
    cpu: Cpu,
    waiting: RunQueue,
}

impl Policy for FcfsScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            waiting: RunQueue::new_fifo(),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fcfs
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        if self.cpu.is_idle() {
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
        let mut jobs: Vec<Job> = self.cpu.clear().into_iter().collect();
        jobs.extend(self.waiting.drain());
        jobs
    }

    fn len(&self) -> usize {
        self.waiting.len() + usize::from(!self.cpu.is_idle())
    }
}
