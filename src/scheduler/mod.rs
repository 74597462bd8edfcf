pub mod cpu;
pub mod fcfs;
pub mod lcfs;
pub mod plcfs;
pub mod ps;
pub mod psjf;
pub mod runqueue;
pub mod sjf;
pub mod srpt;

use std::{fmt, str::FromStr};

use crate::{
    core::{EventKind, EventQueue, EventRef, Ticks},
    error::{Result, SimError},
    sim::{Job, SimEvent},
};
pub use cpu::Cpu;
pub use fcfs::FcfsScheduler;
pub use lcfs::LcfsScheduler;
pub use plcfs::PlcfsScheduler;
pub use ps::PsScheduler;
pub use psjf::PsjfScheduler;
pub use runqueue::{RankBy, RunQueue};
pub use sjf::SjfScheduler;
pub use srpt::SrptScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PolicyKind {
    #[value(name = "FCFS")]
    Fcfs,
    #[value(name = "LCFS")]
    Lcfs,
    #[value(name = "SJF")]
    Sjf,
    #[value(name = "PLCFS")]
    Plcfs,
    #[value(name = "PSJF")]
    Psjf,
    #[value(name = "SRPT")]
    Srpt,
    #[value(name = "PS")]
    Ps,
    #[value(name = "FB")]
    Fb,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 8] = [
        Self::Fcfs,
        Self::Lcfs,
        Self::Sjf,
        Self::Plcfs,
        Self::Psjf,
        Self::Srpt,
        Self::Ps,
        Self::Fb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Lcfs => "LCFS",
            Self::Sjf => "SJF",
            Self::Plcfs => "PLCFS",
            Self::Psjf => "PSJF",
            Self::Srpt => "SRPT",
            Self::Ps => "PS",
            Self::Fb => "FB",
        }
    }

    /// Whether a running job can lose the processor before it finishes.
    pub fn is_preemptive(self) -> bool {
        !matches!(self, Self::Fcfs | Self::Lcfs | Self::Sjf)
    }

    fn build(self) -> Result<Box<dyn Policy>> {
        let policy: Box<dyn Policy> = match self {
            Self::Fcfs => Box::new(FcfsScheduler::init()),
            Self::Lcfs => Box::new(LcfsScheduler::init()),
            Self::Sjf => Box::new(SjfScheduler::init()),
            Self::Plcfs => Box::new(PlcfsScheduler::init()),
            Self::Psjf => Box::new(PsjfScheduler::init()),
            Self::Srpt => Box::new(SrptScheduler::init()),
            Self::Ps => Box::new(PsScheduler::init()),
            // No feedback variant has been chosen yet
            Self::Fb => return Err(SimError::UnimplementedPolicy(self)),
        };
        Ok(policy)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownPolicy(s.to_string()))
    }
}

/// Handle a policy uses to read the clock and manage its single
/// outstanding completion event.
pub struct SchedCtx<'a> {
    queue: &'a mut EventQueue<SimEvent>,
    completion: &'a mut Option<EventRef>,
}

impl<'a> SchedCtx<'a> {
    pub fn new(
        queue: &'a mut EventQueue<SimEvent>,
        completion: &'a mut Option<EventRef>,
    ) -> Self {
        Self { queue, completion }
    }

    pub fn now(&self) -> Ticks {
        self.queue.now()
    }

    pub fn pending_completion(&self) -> Option<EventRef> {
        *self.completion
    }

    /// Schedule the completion `delta` ticks from now.
    pub fn schedule_completion_in(&mut self, delta: Ticks) -> Result<EventRef> {
        let now = self.now();
        let timestamp = now
            .checked_add(delta)
            .ok_or(SimError::ClockOverflow { now, delta })?;
        self.schedule_next_completion(timestamp)
    }

    pub fn schedule_next_completion(&mut self, timestamp: Ticks) -> Result<EventRef> {
        if self.completion.is_some() {
            return Err(SimError::CompletionPending);
        }
        let id = self
            .queue
            .schedule(timestamp, EventKind::Completion, SimEvent::Completion)?;
        *self.completion = Some(id);
        Ok(id)
    }

    pub fn cancel_next_completion(&mut self) -> Result<()> {
        let id = self.completion.take().ok_or(SimError::NoCompletionPending)?;
        self.queue.cancel(id)?;
        Ok(())
    }
}

pub trait Policy {
    fn init() -> Self
    where
        Self: Sized;

    fn kind(&self) -> PolicyKind;

    fn on_arrival(&mut self, ctx: &mut SchedCtx<'_>, job: Job) -> Result<()>;

    /// Called when this policy's completion event fires. Returns the job
    /// that finished.
    fn on_completion(&mut self, ctx: &mut SchedCtx<'_>) -> Result<Job>;

    /// Hand back every job still held. Called once, on destroy.
    fn exit(&mut self) -> Vec<Job>;

    /// Jobs admitted and not yet completed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A policy bound to the completion protocol: at most one completion event
/// is outstanding per scheduler.
pub struct Scheduler {
    policy: Box<dyn Policy>,
    completion: Option<EventRef>,
}

impl Scheduler {
    pub fn new(kind: PolicyKind) -> Result<Self> {
        let policy = kind.build()?;
        tracing::debug!(policy = %kind, "Scheduler created");
        Ok(Self {
            policy,
            completion: None,
        })
    }

    pub fn kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn pending_completion(&self) -> Option<EventRef> {
        self.completion
    }

    /// Jobs currently held by the policy.
    pub fn jobs(&self) -> usize {
        self.policy.len()
    }

    fn split<'a>(
        &'a mut self,
        queue: &'a mut EventQueue<SimEvent>,
    ) -> (&'a mut dyn Policy, SchedCtx<'a>) {
        (
            self.policy.as_mut(),
            SchedCtx::new(queue, &mut self.completion),
        )
    }

    pub fn on_arrival(&mut self, queue: &mut EventQueue<SimEvent>, job: Job) -> Result<()> {
        let (policy, mut ctx) = self.split(queue);
        policy.on_arrival(&mut ctx, job)
    }

    pub fn on_completion(
        &mut self,
        queue: &mut EventQueue<SimEvent>,
        fired: EventRef,
    ) -> Result<Job> {
        debug_assert_eq!(
            self.completion,
            Some(fired),
            "Fired completion is not the one this scheduler holds"
        );
        // The event has left the queue; the slot is free for the policy
        self.completion = None;

        let (policy, mut ctx) = self.split(queue);
        let job = policy.on_completion(&mut ctx)?;
        debug_assert!(job.is_complete(), "Job {} returned unfinished", job.id());
        Ok(job)
    }

    pub fn schedule_next_completion(
        &mut self,
        queue: &mut EventQueue<SimEvent>,
        timestamp: Ticks,
    ) -> Result<EventRef> {
        SchedCtx::new(queue, &mut self.completion).schedule_next_completion(timestamp)
    }

    pub fn cancel_next_completion(&mut self, queue: &mut EventQueue<SimEvent>) -> Result<()> {
        SchedCtx::new(queue, &mut self.completion).cancel_next_completion()
    }

    /// Cancel any outstanding completion and release policy state. Returns
    /// the jobs the policy still held.
    pub fn destroy(mut self, queue: &mut EventQueue<SimEvent>) -> Result<Vec<Job>> {
        if self.completion.is_some() {
            self.cancel_next_completion(queue)?;
        }
        let leftover = self.policy.exit();
        if !leftover.is_empty() {
            tracing::warn!(
                policy = %self.kind(),
                jobs = leftover.len(),
                "Scheduler destroyed with unfinished jobs"
            );
        }
        Ok(leftover)
    }
}
