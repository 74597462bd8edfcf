pub mod driver;
pub mod job;
pub mod stats;
pub mod trace;
pub mod workload;

pub use driver::{Sim, SimEvent, SimReport};
pub use job::{CompletionRecord, Job, JobId};
pub use stats::Summary;
