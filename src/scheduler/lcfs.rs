use super::{Cpu, Policy, PolicyKind, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

/// Last come, first served, without preemption: a later arrival waits for
/// the running job, then jumps ahead of everything that arrived before it.
pub struct LcfsScheduler {
    cpu: Cpu,
    waiting: RunQueue,
}

impl Policy for LcfsScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            waiting: RunQueue::new_lifo(),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lcfs
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        if !self.cpu.is_idle() {
            self.waiting.push(job);
            return Ok(());
        }
        self.cpu.start(ctx, job)
    }

    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job> {
        let Some(done) = self.cpu.finish(ctx.now()) else {
            return Err(SimError::SpuriousCompletion { policy: self.kind() });
        };

        if let Some(latest) = self.waiting.pop() {
            self.cpu.start(ctx, latest)?;
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
