use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::SlotMap;

use super::{
    Ticks,
    event::{Event, EventKey, EventKind, EventRef},
};
use crate::error::{Result, SimError};

/// Pending events plus the simulated clock.
///
/// Payloads live in an arena keyed by [`EventRef`]; the heap only orders the
/// keys. Cancelling is a keyed removal from both, so a handle that was
/// already popped or cancelled is reported instead of touching another event.
#[derive(Debug)]
pub struct EventQueue<T> {
    now: Ticks,
    next_seq: u64,
    events: SlotMap<EventRef, T>,
    order: KeyedPriorityQueue<EventRef, EventKey>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            events: SlotMap::with_key(),
            order: KeyedPriorityQueue::new(),
        }
    }

    /// Timestamp of the most recently dispatched event, 0 before any.
    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, id: EventRef) -> bool {
        self.events.contains_key(id)
    }

    pub fn schedule(&mut self, timestamp: Ticks, kind: EventKind, payload: T) -> Result<EventRef> {
        if timestamp < self.now {
            return Err(SimError::TimeTravel {
                timestamp,
                now: self.now,
            });
        }

        let key = EventKey {
            timestamp,
            kind,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let id = self.events.insert(payload);
        let displaced = self.order.push(id, key);
        debug_assert!(displaced.is_none(), "Fresh event key {id:?} already ordered");

        Ok(id)
    }

    /// Remove an event without firing it.
    pub fn cancel(&mut self, id: EventRef) -> Result<T> {
        let payload = self.events.remove(id).ok_or(SimError::UnknownEvent)?;
        let removed = self.order.remove(&id);
        debug_assert!(removed.is_some(), "Event {id:?} missing from ordering");
        Ok(payload)
    }

    pub fn peek_key(&self) -> Option<EventKey> {
        self.order.peek().map(|(_, key)| *key)
    }

    /// Remove the earliest event and move the clock to its timestamp.
    pub fn pop_earliest(&mut self) -> Option<Event<T>> {
        let (id, key) = self.order.pop()?;
        let payload = self
            .events
            .remove(id)
            .expect("Ordered event missing from arena");

        debug_assert!(key.timestamp >= self.now, "Event {id:?} scheduled in the past");
        self.now = key.timestamp;

        Some(Event { id, key, payload })
    }
}
