pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;

pub type Ticks = u64;

pub use driver::SchedCore;
pub use event::{Event, EventKey, EventKind, EventRef};
pub use observer::Observer;
pub use queue::EventQueue;
