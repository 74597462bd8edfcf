use super::{
    job::{CompletionRecord, Job},
    stats::Summary,
};
use crate::{
    core::{Event, EventKey, EventKind, EventQueue, SchedCore, Ticks},
    error::Result,
    scheduler::{PolicyKind, Scheduler},
};

/// Payload carried by every simulator event.
#[derive(Debug)]
pub enum SimEvent {
    Arrival(Job),
    Completion,
}

/// Replays a set of arrivals through one scheduler.
pub struct Sim {
    pub core: SchedCore<SimEvent>,
    scheduler: Scheduler,
    completions: Vec<CompletionRecord>,
}

/// What a finished run leaves behind.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub policy: PolicyKind,
    /// In completion order.
    pub completions: Vec<CompletionRecord>,
    pub events: u64,
    pub end_time: Ticks,
}

impl SimReport {
    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.completions)
    }
}

impl Sim {
    pub fn new(policy: PolicyKind, jobs: impl IntoIterator<Item = Job>) -> Result<Self> {
        let scheduler = Scheduler::new(policy)?;
        let mut core = SchedCore::new();
        for (admission, job) in (0..).zip(jobs) {
            let job = job.with_admission(admission);
            core.queue
                .schedule(job.arrival_time(), EventKind::Arrival, SimEvent::Arrival(job))?;
        }

        Ok(Self {
            core,
            scheduler,
            completions: Vec::new(),
        })
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completions
    }

    pub fn is_done(&self) -> bool {
        self.core.queue.is_empty()
    }

    /// Dispatch one event. Returns `None` once the queue is empty.
    pub fn step(&mut self) -> Result<Option<EventKey>> {
        let Self {
            core,
            scheduler,
            completions,
        } = self;
        core.step(&mut |queue: &mut EventQueue<SimEvent>, event: Event<SimEvent>| {
            dispatch(scheduler, completions, queue, event)
        })
    }

    pub fn run(self) -> Result<SimReport> {
        let Self {
            mut core,
            mut scheduler,
            mut completions,
        } = self;
        let policy = scheduler.kind();
        tracing::info!(%policy, arrivals = core.queue.len(), "Simulation started");

        let events = core.run(|queue, event| {
            dispatch(&mut scheduler, &mut completions, queue, event)
        })?;

        let leftover = scheduler.destroy(&mut core.queue)?;
        debug_assert!(leftover.is_empty(), "Queue drained with jobs still held");

        let end_time = core.now();
        tracing::info!(
            %policy,
            events,
            end_time,
            completed = completions.len(),
            "Simulation finished"
        );

        Ok(SimReport {
            policy,
            completions,
            events,
            end_time,
        })
    }
}

fn dispatch(
    scheduler: &mut Scheduler,
    completions: &mut Vec<CompletionRecord>,
    queue: &mut EventQueue<SimEvent>,
    event: Event<SimEvent>,
) -> Result<()> {
    match event.payload {
        SimEvent::Arrival(job) => {
            debug_assert_eq!(job.arrival_time(), queue.now());
            scheduler.on_arrival(queue, job)
        }
        SimEvent::Completion => {
            let job = scheduler.on_completion(queue, event.id)?;
            record_completion(completions, job, queue.now());
            Ok(())
        }
    }
}

// The job is released here; only its record outlives the run
fn record_completion(completions: &mut Vec<CompletionRecord>, job: Job, now: Ticks) {
    debug_assert!(job.is_complete(), "Job {} recorded unfinished", job.id());
    debug_assert!(
        now - job.arrival_time() >= job.job_time(),
        "Job {} finished faster than its demand",
        job.id()
    );
    tracing::trace!(t = now, job = job.id(), "Job completed");
    completions.push(CompletionRecord::new(&job, now));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_walks_one_event_at_a_time() {
        let jobs = [Job::new(1, 0, 5), Job::new(2, 0, 3)];
        let mut sim = Sim::new(PolicyKind::Fcfs, jobs).unwrap();
        assert_eq!(sim.core.queue.len(), 2);

        let first = sim.step().unwrap().unwrap();
        assert_eq!(first.kind, EventKind::Arrival);
        assert_eq!(sim.scheduler().jobs(), 1);
        assert!(sim.scheduler().pending_completion().is_some());

        sim.step().unwrap();
        let completion = sim.step().unwrap().unwrap();
        assert_eq!(completion.kind, EventKind::Completion);
        assert_eq!(sim.now(), 5);
        assert_eq!(sim.completions()[0].id, 1);

        sim.step().unwrap();
        assert!(sim.is_done());
        assert!(sim.step().unwrap().is_none());
        assert_eq!(sim.completions().len(), 2);
    }

    #[test]
    fn run_reports_end_state() {
        let jobs = [Job::new(1, 2, 4)];
        let report = Sim::new(PolicyKind::Ps, jobs).unwrap().run().unwrap();
        assert_eq!(report.policy, PolicyKind::Ps);
        assert_eq!(report.events, 2);
        assert_eq!(report.end_time, 6);
        assert_eq!(report.completions.len(), 1);
    }

    #[test]
    fn empty_trace_finishes_at_zero() {
        let report = Sim::new(PolicyKind::Srpt, Vec::new()).unwrap().run().unwrap();
        assert_eq!(report.events, 0);
        assert_eq!(report.end_time, 0);
        assert!(report.completions.is_empty());
    }
}
