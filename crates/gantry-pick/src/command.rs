//! Latency-delayed command queue.
//!
//! Commands are issued by the client (UI, scripting) and take effect only
//! after the configured round-trip latency has elapsed, which is the whole
//! point of the simulator: the operator acts on stale video and the arm
//! obeys late. Each scheduled command captures the run generation at issue
//! time; when a command comes due under a newer generation (the run was
//! stopped, restarted, or reconfigured in the meantime) it is dropped
//! instead of applied.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// Monotonic counter identifying one start/stop/reconfigure epoch of the
/// simulator. Bumped by the engine; commands from older epochs are stale.
pub type RunGeneration = u64;

/// A single arm command. Validation (clamping, held-state checks) happens
/// at issue time in the engine; by the time a command is queued it is
/// already well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Seek the arm to the given track coordinate.
    Move { target: f64 },
    /// Close the gripper and attempt a capture.
    Grab,
    /// Open the gripper, discarding any held object.
    Release,
}

/// A command waiting out its network delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub command: Command,
    /// Simulation clock when the client issued the command.
    pub issued_at_ms: f64,
    /// Simulation clock at which the command becomes applicable.
    pub effective_at_ms: f64,
    /// Run generation captured at issue time.
    pub generation: RunGeneration,
}

// ---------------------------------------------------------------------------
// DelayQueue
// ---------------------------------------------------------------------------

/// Commands drained from the queue at a tick boundary, split into the ones
/// to apply and the stale ones to report.
#[derive(Debug, Default)]
pub struct DrainedCommands {
    /// Due commands in issue order.
    pub due: Vec<Command>,
    /// Commands discarded because their generation was superseded.
    pub stale: Vec<Command>,
}

/// Queue of in-flight commands ordered by issue time.
///
/// Latencies are uniform within a run (one locale/region pair), so issue
/// order and effective order coincide and a plain Vec scan suffices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelayQueue {
    pending: Vec<ScheduledCommand>,
}

impl DelayQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule a command to fire `latency_ms` after `now_ms`, tagged with
    /// the current run generation.
    pub fn schedule(
        &mut self,
        command: Command,
        now_ms: f64,
        latency_ms: f64,
        generation: RunGeneration,
    ) {
        self.pending.push(ScheduledCommand {
            command,
            issued_at_ms: now_ms,
            effective_at_ms: now_ms + latency_ms,
            generation,
        });
    }

    /// Remove everything that should leave the queue at `now_ms`: due
    /// commands from the current generation (returned in issue order for
    /// application) and any command from a superseded generation,
    /// whether due or not.
    pub fn drain_due(&mut self, now_ms: f64, current: RunGeneration) -> DrainedCommands {
        let mut drained = DrainedCommands::default();
        self.pending.retain(|scheduled| {
            if scheduled.generation != current {
                drained.stale.push(scheduled.command);
                false
            } else if scheduled.effective_at_ms <= now_ms {
                drained.due.push(scheduled.command);
                false
            } else {
                true
            }
        });
        drained
    }

    /// Number of commands still in flight.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether no commands are in flight.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all in-flight commands.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test 1: new_queue_is_empty
    // -----------------------------------------------------------------------
    #[test]
    fn new_queue_is_empty() {
        let queue = DelayQueue::new();
        assert_eq!(queue.pending_count(), 0);
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 2: command_not_due_before_latency
    // -----------------------------------------------------------------------
    #[test]
    fn command_not_due_before_latency() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 100.0, 50.0, 0);

        let drained = queue.drain_due(149.0, 0);
        assert!(drained.due.is_empty());
        assert!(drained.stale.is_empty());
        assert_eq!(queue.pending_count(), 1);
    }

    // -----------------------------------------------------------------------
    // Test 3: command_due_at_exact_boundary
    // -----------------------------------------------------------------------
    #[test]
    fn command_due_at_exact_boundary() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 100.0, 50.0, 0);

        let drained = queue.drain_due(150.0, 0);
        assert_eq!(drained.due, vec![Command::Grab]);
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 4: drain_preserves_issue_order
    // -----------------------------------------------------------------------
    #[test]
    fn drain_preserves_issue_order() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Move { target: 120.0 }, 0.0, 20.0, 0);
        queue.schedule(Command::Grab, 5.0, 20.0, 0);
        queue.schedule(Command::Release, 10.0, 20.0, 0);

        let drained = queue.drain_due(30.0, 0);
        assert_eq!(
            drained.due,
            vec![
                Command::Move { target: 120.0 },
                Command::Grab,
                Command::Release,
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Test 5: partial_drain_keeps_undue_commands
    // -----------------------------------------------------------------------
    #[test]
    fn partial_drain_keeps_undue_commands() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 0.0, 20.0, 0);
        queue.schedule(Command::Release, 15.0, 20.0, 0);

        let drained = queue.drain_due(20.0, 0);
        assert_eq!(drained.due, vec![Command::Grab]);
        assert_eq!(queue.pending_count(), 1);

        let drained = queue.drain_due(35.0, 0);
        assert_eq!(drained.due, vec![Command::Release]);
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 6: stale_generation_dropped_even_when_due
    // -----------------------------------------------------------------------
    #[test]
    fn stale_generation_dropped_even_when_due() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 0.0, 20.0, 0);

        // Generation advanced before the command came due.
        let drained = queue.drain_due(100.0, 1);
        assert!(drained.due.is_empty());
        assert_eq!(drained.stale, vec![Command::Grab]);
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 7: stale_generation_dropped_before_due
    // -----------------------------------------------------------------------
    #[test]
    fn stale_generation_dropped_before_due() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Move { target: 400.0 }, 0.0, 200.0, 3);

        // Not yet due, but superseded. Drops immediately.
        let drained = queue.drain_due(10.0, 4);
        assert_eq!(drained.stale, vec![Command::Move { target: 400.0 }]);
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 8: mixed_generations_split_correctly
    // -----------------------------------------------------------------------
    #[test]
    fn mixed_generations_split_correctly() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 0.0, 10.0, 1);
        queue.schedule(Command::Release, 0.0, 10.0, 2);
        queue.schedule(Command::Move { target: 90.0 }, 0.0, 500.0, 2);

        let drained = queue.drain_due(10.0, 2);
        assert_eq!(drained.due, vec![Command::Release]);
        assert_eq!(drained.stale, vec![Command::Grab]);
        // Current-generation command that is not yet due stays.
        assert_eq!(queue.pending_count(), 1);
    }

    // -----------------------------------------------------------------------
    // Test 9: clear_drops_everything
    // -----------------------------------------------------------------------
    #[test]
    fn clear_drops_everything() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Grab, 0.0, 10.0, 0);
        queue.schedule(Command::Release, 0.0, 10.0, 0);
        queue.clear();
        assert!(queue.is_empty());
    }

    // -----------------------------------------------------------------------
    // Test 10: queue_serde_round_trip
    // -----------------------------------------------------------------------
    #[test]
    fn queue_serde_round_trip() {
        let mut queue = DelayQueue::new();
        queue.schedule(Command::Move { target: 250.0 }, 12.0, 28.0, 7);

        let json = serde_json::to_string(&queue).unwrap();
        let back: DelayQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pending_count(), 1);

        let drained = back.clone().drain_due(40.0, 7);
        assert_eq!(drained.due, vec![Command::Move { target: 250.0 }]);
    }
}
