use thiserror::Error;

use crate::core::Ticks;
use crate::scheduler::PolicyKind;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Event scheduled at t={timestamp}, before the current time t={now}")]
    TimeTravel { timestamp: Ticks, now: Ticks },

    #[error("Completion {delta} ticks after t={now} is past the end of simulated time")]
    ClockOverflow { now: Ticks, delta: Ticks },

    #[error("A completion is already outstanding")]
    CompletionPending,

    #[error("No completion is outstanding")]
    NoCompletionPending,

    #[error("Event reference is not pending in this queue")]
    UnknownEvent,

    #[error("{policy} received a completion with no finished job")]
    SpuriousCompletion { policy: PolicyKind },

    #[error("Invalid scheduler type: {0}")]
    UnknownPolicy(String),

    #[error("Scheduler {0} has no implementation")]
    UnimplementedPolicy(PolicyKind),

    #[error("Malformed trace record at line {line}")]
    MalformedTrace { line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
