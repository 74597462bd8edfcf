use super::SchedCtx;
use crate::{core::Ticks, error::Result, sim::Job};

/// The processor slot for policies that run one job at a time.
///
/// `since` is when the current job last started or resumed; service is
/// charged to the job only when it leaves the processor.
#[derive(Debug, Default)]
pub struct Cpu {
    current: Option<Job>,
    since: Ticks,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Remaining demand of the running job as of `now`.
    pub fn remaining_at(&self, now: Ticks) -> Option<Ticks> {
        self.current
            .as_ref()
            .map(|job| job.remaining_time().saturating_sub(now - self.since))
    }

    /// Give the processor to `job` and schedule its completion.
    pub fn start(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()> {
        debug_assert!(self.is_idle(), "Job {} started on a busy CPU", job.id());

        let now = ctx.now();
        ctx.schedule_completion_in(job.remaining_time())?;
        tracing::debug!(
            t = now,
            job = job.id(),
            remaining = job.remaining_time(),
            "Job started"
        );

        self.since = now;
        self.current = Some(job);
        Ok(())
    }

    /// Take the running job off the processor, charging it for the service
    /// it got since it started, and cancel its completion.
    pub fn preempt(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Option<Job>> {
        let Some(mut job) = self.current.take() else {
            return Ok(None);
        };

        let now = ctx.now();
        job.charge(now - self.since);
        ctx.cancel_next_completion()?;
        tracing::debug!(
            t = now,
            job = job.id(),
            remaining = job.remaining_time(),
            "Job preempted"
        );

        Ok(Some(job))
    }

    /// Retire the running job at its completion time.
    pub fn finish(&mut self, now: Ticks) -> Option<Job> {
        let mut job = self.current.take()?;
        job.charge(now - self.since);
        debug_assert!(
            job.is_complete(),
            "Job {} finished with {} remaining",
            job.id(),
            job.remaining_time()
        );
        Some(job)
    }

    /// Release the running job without charging it.
    pub fn clear(&mut self) -> Option<Job> {
        self.current.take()
    }
}
