pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use scheduler::{Policy, PolicyKind, Scheduler};
pub use sim::{CompletionRecord, Job, Sim, SimReport};
