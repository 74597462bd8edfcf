use super::{Cpu, Policy, PolicyKind, RunQueue, SchedCtx};
use crate::{
    error::{Result, SimError},
    sim::Job,
};

/// Preemptive LCFS: every arrival takes the processor. Preempted jobs stack
/// up and resume newest first.
pub struct PlcfsScheduler {
    cpu: Cpu,
    suspended: RunQueue,
}

impl Policy for PlcfsScheduler {
    fn init() -> Self {
        Self {
            cpu: Cpu::new(),
            suspended: RunQueue::new_lifo(),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Plcfs
    }

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        if let Some(preempted) = self.cpu.preempt(ctx)? {
            self.suspended.push(preempted);
        }
        self.cpu.start(ctx, job)
    }

    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job> {
        let done = self
            .cpu
            .finish(ctx.now())
            .ok_or(SimError::SpuriousCompletion { policy: self.kind() })?;

        if let Some(resumed) = self.suspended.pop() {
            self.cpu.start(ctx, resumed)?;
        }
        Ok(done)
    }

    fn exit(&mut self) -> Vec<Job> {
        let mut jobs = self.suspended.drain();
        jobs.extend(self.cpu.clear());
        jobs
    }

    fn len(&self) -> usize {
        self.suspended.len() + usize::from(!self.cpu.is_idle())
    }
}
