use std::cmp::Ordering;

use slotmap::new_key_type;

use super::Ticks;

new_key_type! {
    pub struct EventRef;
}

// Declaration order is the tie-break order at equal timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Completion,
    Arrival,
}

/// Position of an event in the queue: timestamp, then kind, then the
/// sequence number assigned when it was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub timestamp: Ticks,
    pub kind: EventKind,
    pub seq: u64,
}

impl EventKey {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.seq.cmp(&other.seq))
    }

    /// True if `self` is dispatched before `other`.
    pub fn precedes(&self, other: &Self) -> bool {
        self.natural_cmp(other) == Ordering::Less
    }
}

// KeyedPriorityQueue is a max-heap, so the earliest key must compare greatest
impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.natural_cmp(self)
    }
}

#[derive(Debug)]
pub struct Event<T> {
    pub id: EventRef,
    pub key: EventKey,
    pub payload: T,
}

impl<T> Event<T> {
    pub fn timestamp(&self) -> Ticks {
        self.key.timestamp
    }

    pub fn kind(&self) -> EventKind {
        self.key.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(timestamp: Ticks, kind: EventKind, seq: u64) -> EventKey {
        EventKey {
            timestamp,
            kind,
            seq,
        }
    }

    #[test]
    fn earlier_timestamp_wins() {
        let a = key(3, EventKind::Arrival, 0);
        let b = key(4, EventKind::Completion, 1);
        assert!(a.precedes(&b));
        assert!(a > b, "heap order is inverted");
    }

    #[test]
    fn completion_precedes_arrival_at_same_time() {
        let arrival = key(5, EventKind::Arrival, 0);
        let completion = key(5, EventKind::Completion, 9);
        assert!(completion.precedes(&arrival));
        assert!(!arrival.precedes(&completion));
    }

    #[test]
    fn sequence_breaks_remaining_ties() {
        let first = key(5, EventKind::Arrival, 1);
        let second = key(5, EventKind::Arrival, 2);
        assert!(first.precedes(&second));
        assert!(!first.precedes(&first));
    }
}
