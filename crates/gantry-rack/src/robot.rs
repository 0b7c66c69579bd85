//! Teleoperated robot worker.
//!
//! The robot is slow but deterministic: it advances total task progress at
//! a fixed rate, works the cables strictly in order, and always seats each
//! cable in its designated port. Within each cable's slice of the task it
//! walks a fixed phase sequence so observers can see what it is doing.

use serde::{Deserialize, Serialize};

use crate::task::{CABLES, CableSpec, PluggedCable};

/// Total task progress gained per millisecond. One full task takes ten
/// seconds of simulated time.
pub const PROGRESS_PER_MS: f64 = 1e-4;

/// Number of ports the scanner sweeps while locating a cable's target.
const SCAN_SWEEP_PORTS: u8 = 5;

/// Segment-progress threshold at which a cable counts as seated.
const SEAT_THRESHOLD: f64 = 0.95;

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// What the robot is doing within the current cable's segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotPhase {
    Scanning,
    Identifying,
    Routing,
    Plugging,
    Verifying,
}

impl RobotPhase {
    /// Phase for a segment progress in `[0, 1)`.
    fn for_segment(seg: f64) -> Self {
        if seg < 0.2 {
            RobotPhase::Scanning
        } else if seg < 0.35 {
            RobotPhase::Identifying
        } else if seg < 0.65 {
            RobotPhase::Routing
        } else if seg < 0.85 {
            RobotPhase::Plugging
        } else {
            RobotPhase::Verifying
        }
    }
}

// ---------------------------------------------------------------------------
// Task state
// ---------------------------------------------------------------------------

/// The robot's run through the cabling task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotTask {
    progress: f64,
    elapsed_ms: f64,
    plugged: Vec<PluggedCable>,
}

impl Default for RobotTask {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotTask {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            elapsed_ms: 0.0,
            plugged: Vec::with_capacity(CABLES.len()),
        }
    }

    /// Advance the robot by `dt_ms` of simulated time. No-op once the
    /// task is complete.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.is_complete() {
            return;
        }
        let dt_ms = dt_ms.max(0.0);
        self.elapsed_ms += dt_ms;
        self.progress = (self.progress + dt_ms * PROGRESS_PER_MS).min(1.0);

        // Seat every cable whose segment has reached the seating
        // threshold. A large tick can seat more than one.
        while self.plugged.len() < CABLES.len() {
            let idx = self.plugged.len();
            let seg_start = idx as f64 / CABLES.len() as f64;
            let seg = (self.progress - seg_start) * CABLES.len() as f64;
            if seg < SEAT_THRESHOLD && self.progress < 1.0 {
                break;
            }
            let cable = CABLES[idx];
            tracing::debug!(cable = cable.label, port = cable.target_port, "robot seated cable");
            self.plugged.push(PluggedCable::record(cable, cable.target_port));
        }
    }

    /// Overall progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Simulated time spent so far, milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_complete(&self) -> bool {
        self.plugged.len() == CABLES.len()
    }

    /// The cable currently being worked, if any.
    pub fn current_cable(&self) -> Option<CableSpec> {
        CABLES.get(self.plugged.len()).copied()
    }

    /// Progress through the current cable's segment, in `[0, 1)`.
    fn segment_progress(&self) -> Option<f64> {
        if self.is_complete() {
            return None;
        }
        let seg_start = self.plugged.len() as f64 / CABLES.len() as f64;
        Some(((self.progress - seg_start) * CABLES.len() as f64).clamp(0.0, 1.0))
    }

    /// What the robot is doing right now. `None` once complete.
    pub fn phase(&self) -> Option<RobotPhase> {
        self.segment_progress().map(RobotPhase::for_segment)
    }

    /// The port the scanner beam is over, while in the scanning phase.
    /// Sweeps ports `1..=5` once across the phase.
    pub fn scanned_port(&self) -> Option<u8> {
        let seg = self.segment_progress()?;
        if seg >= 0.2 {
            return None;
        }
        let step = (seg / 0.2 * f64::from(SCAN_SWEEP_PORTS)) as u8;
        Some((step + 1).min(SCAN_SWEEP_PORTS))
    }

    /// Cables seated so far, in completion order.
    pub fn plugged(&self) -> &[PluggedCable] {
        &self.plugged
    }
}

// ===========================================================================
// Tests
// ===========================================================================
