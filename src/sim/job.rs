use crate::core::Ticks;

pub type JobId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    arrival_time: Ticks,
    job_time: Ticks,
    remaining_time: Ticks,
    admission: u64,
}

impl Job {
    pub fn new(id: JobId, arrival_time: Ticks, job_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            job_time,
            remaining_time: job_time,
            admission: 0,
        }
    }

    /// Tag the job with its position in the trace. Jobs arriving at the same
    /// instant are admitted in this order.
    pub fn with_admission(mut self, admission: u64) -> Self {
        self.admission = admission;
        self
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn job_time(&self) -> Ticks {
        self.job_time
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn admission(&self) -> u64 {
        self.admission
    }

    /// Position in arrival order: arrival time, then trace position.
    /// Fixed for the life of the job, however often it is preempted.
    pub fn arrival_order(&self) -> (Ticks, u64) {
        (self.arrival_time, self.admission)
    }

    /// Service already rendered.
    pub fn completed_time(&self) -> Ticks {
        self.job_time - self.remaining_time
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Credit `service` units of processor time to this job.
    pub fn charge(&mut self, service: Ticks) {
        debug_assert!(
            service <= self.remaining_time,
            "Job {} charged {service} with only {} remaining",
            self.id,
            self.remaining_time
        );
        self.remaining_time = self.remaining_time.saturating_sub(service);
    }
}

/// One line of simulator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub job_time: Ticks,
    pub completion_time: Ticks,
}

impl CompletionRecord {
    pub fn new(job: &Job, completion_time: Ticks) -> Self {
        Self {
            id: job.id(),
            arrival_time: job.arrival_time(),
            job_time: job.job_time(),
            completion_time,
        }
    }

    /// Time from arrival to completion.
    pub fn turnaround(&self) -> Ticks {
        self.completion_time - self.arrival_time
    }
}
