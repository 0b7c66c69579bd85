//! Typed simulation events.
//!
//! Events are recorded as the engine mutates state during `tick` and
//! drained by the renderer once per frame. There is a single consumer, so
//! a bounded queue is enough: no subscriber bus, and if the consumer
//! stalls the oldest events are evicted rather than growing the queue.

use std::collections::VecDeque;

use crate::command::Command;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A simulation event. All events carry the simulation clock at which
/// they occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum PickEvent {
    // -- Object lifecycle --
    ObjectSpawned { serial: u64, at_ms: f64 },
    ObjectMissed { serial: u64, at_ms: f64 },
    ObjectExited { serial: u64, at_ms: f64 },

    // -- Arm outcomes --
    ObjectPicked { serial: u64, at_ms: f64 },
    ObjectReleased { serial: u64, at_ms: f64 },

    // -- Command delivery --
    CommandApplied { command: Command, at_ms: f64 },
    StaleCommandDropped { command: Command, at_ms: f64 },
}

// ---------------------------------------------------------------------------
// EventBuffer — bounded event queue
// ---------------------------------------------------------------------------

/// Events awaiting the per-frame drain, oldest first. Holds at most
/// `capacity` entries; pushing into a full queue evicts the oldest and
/// tallies it, so a stalled consumer loses history, not memory.
#[derive(Debug)]
pub struct EventBuffer {
    queue: VecDeque<PickEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventBuffer {
    /// A queue holding at most `capacity` events. Zero is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Record an event, evicting the oldest if the queue is full.
    pub fn push(&mut self, event: PickEvent) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
            self.dropped += 1;
        }
        self.queue.push_back(event);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Events evicted unread over the buffer's lifetime.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Buffered events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PickEvent> {
        self.queue.iter()
    }

    /// Take every buffered event, oldest first. The per-frame consumer
    /// entry point.
    pub fn drain(&mut self) -> Vec<PickEvent> {
        self.queue.drain(..).collect()
    }

    /// Discard buffered events without reading them.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new(256)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
