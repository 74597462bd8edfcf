use super::{
    Ticks,
    event::{Event, EventKey},
    observer::Observer,
    queue::EventQueue,
};
use crate::error::Result;

/// The simulation kernel: pops events in order and hands each one to a
/// dispatcher. It knows nothing about jobs or policies.
pub struct SchedCore<T> {
    pub queue: EventQueue<T>,
    observer: Observer,
}

impl<T> Default for SchedCore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SchedCore<T> {
    pub fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            observer: Observer::new(),
        }
    }

    /// Dispatch the earliest pending event, if any.
    ///
    /// The dispatcher receives the queue so it can schedule or cancel
    /// follow-up events; the clock already reads the event's timestamp.
    pub fn step<F>(&mut self, dispatch: &mut F) -> Result<Option<EventKey>>
    where
        F: FnMut(&mut EventQueue<T>, Event<T>) -> Result<()>,
    {
        let Some(event) = self.queue.pop_earliest() else {
            return Ok(None);
        };

        let key = event.key;
        self.observer.observe(key, self.queue.now());
        tracing::trace!(
            t = key.timestamp,
            kind = ?key.kind,
            seq = key.seq,
            "Dispatching event"
        );

        dispatch(&mut self.queue, event)?;
        Ok(Some(key))
    }

    /// Run until the queue drains. Returns the number of events dispatched.
    pub fn run<F>(&mut self, mut dispatch: F) -> Result<u64>
    where
        F: FnMut(&mut EventQueue<T>, Event<T>) -> Result<()>,
    {
        let start = self.observer.steps();
        while self.step(&mut dispatch)?.is_some() {}
        Ok(self.observer.steps() - start)
    }

    pub fn now(&self) -> Ticks {
        self.queue.now()
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventKind;
    use crate::error::SimError;

    #[test]
    fn run_drains_and_follows_up() {
        let mut core = SchedCore::new();
        core.queue.schedule(2, EventKind::Arrival, 3u32).unwrap();

        let mut seen = Vec::new();
        let dispatched = core
            .run(|queue, event| {
                seen.push((queue.now(), event.payload));
                if event.payload > 0 {
                    queue.schedule(queue.now() + 1, EventKind::Arrival, event.payload - 1)?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(dispatched, 4);
        assert_eq!(seen, [(2, 3), (3, 2), (4, 1), (5, 0)]);
        assert_eq!(core.now(), 5);
        assert!(core.queue.is_empty());
    }

    #[test]
    fn dispatch_errors_abort_the_run() {
        let mut core = SchedCore::new();
        core.queue.schedule(4, EventKind::Arrival, ()).unwrap();
        core.queue.schedule(8, EventKind::Arrival, ()).unwrap();

        let err = core
            .run(|queue, _| {
                queue.schedule(0, EventKind::Completion, ())?;
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, SimError::TimeTravel { timestamp: 0, now: 4 }));
        assert_eq!(core.observer().steps(), 1);
        assert_eq!(core.queue.len(), 1, "later events stay pending");
    }
}
