use super::{Ticks, event::EventKey};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last: Option<EventKey>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events dispatched so far.
    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn last_dispatched(&self) -> Option<EventKey> {
        self.last
    }

    pub fn observe(&mut self, key: EventKey, now: Ticks) {
        self.step += 1;

        debug_assert_eq!(
            key.timestamp, now,
            "Clock must sit on the timestamp of the event being dispatched"
        );

        if let Some(prev) = self.last {
            debug_assert!(
                prev.timestamp <= key.timestamp,
                "Clock went backwards: {prev:?} dispatched before {key:?}"
            );
            debug_assert!(
                prev.seq != key.seq,
                "Event sequence {} dispatched twice",
                key.seq
            );
        }

        self.last = Some(key);
    }
}
