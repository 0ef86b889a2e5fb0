//! Deferred events keyed by simulation time.
//!
//! Bomb fuses and explosion displays are not timers of their own: they are entries in a
//! [`Schedule`] that the controller drains as it advances its clock.

use std::{cmp::Reverse, collections::BinaryHeap, time::Duration};

/// Something that happens at a fixed point of simulation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    /// The bomb with the given id detonates.
    Detonate(u64),
    /// The explosion display ends and a bomb is returned to the player.
    ClearExplosion,
}

/// A scheduled event together with its ordering keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    /// Simulation time at which the event is due.
    due: Duration,
    /// Insertion counter, ordering events due at the same time.
    seq: u64,
    /// The event itself.
    event: Event,
}

/// Queue of pending events, earliest first.
///
/// Events due at the same instant come out in the order they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    /// Pending entries.
    queue: BinaryHeap<Reverse<Entry>>,
    /// Sequence number handed to the next entry.
    next_seq: u64,
}

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` at simulation time `due`.
    pub fn push(&mut self, due: Duration, event: Event) {
        self.queue.push(Reverse(Entry {
            due,
            seq: self.next_seq,
            event,
        }));
        self.next_seq += 1;
    }

    /// Returns when the earliest pending event is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Removes and returns the earliest event if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Event)> {
        if self.next_due()? > now {
            return None;
        }

        self.queue
            .pop()
            .map(|Reverse(entry)| (entry.due, entry.event))
    }

    /// Drops every pending event.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
