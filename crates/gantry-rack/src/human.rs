//! Human worker.
//!
//! The human is interactive: a caller grabs the next cable, picks a port,
//! and plugs it. Plugs are instant but can land in the wrong port, and the
//! final cable is followed by a short settle before the task counts as
//! done. Workmanship quality (sloppy seating, violated bend radius) is
//! drawn once per run from the session RNG.

use serde::{Deserialize, Serialize};

use crate::RackError;
use crate::rng::SimRng;
use crate::task::{CABLES, CableSpec, PluggedCable, valid_port};

/// Settle time after the last plug, milliseconds.
pub const SETTLE_MS: f64 = 500.0;

/// Error-rate draw above which the run counts as having a misplug risk.
pub const MISPLUG_THRESHOLD: f64 = 0.2;

/// Probability that the human violates a cable's bend radius.
const BEND_VIOLATION_P: f64 = 0.3;

// ---------------------------------------------------------------------------
// Workmanship
// ---------------------------------------------------------------------------

/// Per-run quality draws, fixed at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Workmanship {
    pub error_rate: f64,
    pub bend_violation: bool,
}

impl Workmanship {
    pub fn draw(rng: &mut SimRng) -> Self {
        Self {
            error_rate: rng.next_f64(),
            bend_violation: rng.chance(BEND_VIOLATION_P),
        }
    }

    /// True when the seating quality draw crosses the misplug threshold.
    pub fn misplug_risk(&self) -> bool {
        self.error_rate > MISPLUG_THRESHOLD
    }
}

// ---------------------------------------------------------------------------
// Task state
// ---------------------------------------------------------------------------

/// Where the human is in the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanPhase {
    /// Waiting to grab the next cable.
    Idle,
    /// Holding a cable, waiting for a port choice.
    Holding,
    /// All cables plugged; tidying up.
    Settling,
    Complete,
}

/// Final tally of a human run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanOutcome {
    pub correct_count: usize,
    pub error_count: usize,
    pub misplug_risk: bool,
    pub bend_violation: bool,
    pub elapsed_ms: f64,
}

/// The human's run through the cabling task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanTask {
    phase: HumanPhase,
    plugged: Vec<PluggedCable>,
    elapsed_ms: f64,
    started: bool,
    settle_remaining_ms: f64,
    workmanship: Workmanship,
}

impl HumanTask {
    pub fn new(workmanship: Workmanship) -> Self {
        Self {
            phase: HumanPhase::Idle,
            plugged: Vec::with_capacity(CABLES.len()),
            elapsed_ms: 0.0,
            started: false,
            settle_remaining_ms: 0.0,
            workmanship,
        }
    }

    /// Advance wall time. The clock runs from the first grab until the
    /// task completes.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.started || self.phase == HumanPhase::Complete {
            return;
        }
        let dt_ms = dt_ms.max(0.0);
        self.elapsed_ms += dt_ms;
        if self.phase == HumanPhase::Settling {
            self.settle_remaining_ms -= dt_ms;
            if self.settle_remaining_ms <= 0.0 {
                self.settle_remaining_ms = 0.0;
                self.phase = HumanPhase::Complete;
                tracing::debug!(errors = self.error_count(), "human run complete");
            }
        }
    }

    /// Pick up the next unplugged cable.
    pub fn grab(&mut self) -> Result<(), RackError> {
        if self.phase != HumanPhase::Idle || self.plugged.len() == CABLES.len() {
            return Err(RackError::NotIdle);
        }
        self.started = true;
        self.phase = HumanPhase::Holding;
        Ok(())
    }

    /// Seat the held cable in `port`. A wrong port still counts as
    /// plugged. The last plug starts the settle timer.
    pub fn plug(&mut self, port: u8) -> Result<PluggedCable, RackError> {
        if self.phase != HumanPhase::Holding {
            return Err(RackError::NotHolding);
        }
        if !valid_port(port) {
            return Err(RackError::InvalidPort { port });
        }
        let cable = CABLES[self.plugged.len()];
        let plug = PluggedCable::record(cable, port);
        tracing::debug!(cable = cable.label, port, correct = plug.correct, "human plugged cable");
        self.plugged.push(plug);
        if self.plugged.len() == CABLES.len() {
            self.phase = HumanPhase::Settling;
            self.settle_remaining_ms = SETTLE_MS;
        } else {
            self.phase = HumanPhase::Idle;
        }
        Ok(plug)
    }

    pub fn phase(&self) -> HumanPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == HumanPhase::Complete
    }

    /// The cable the human would grab or is holding, if any remain.
    pub fn current_cable(&self) -> Option<CableSpec> {
        CABLES.get(self.plugged.len()).copied()
    }

    pub fn plugged(&self) -> &[PluggedCable] {
        &self.plugged
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn workmanship(&self) -> Workmanship {
        self.workmanship
    }

    fn error_count(&self) -> usize {
        self.plugged.iter().filter(|p| !p.correct).count()
    }

    /// Final tally, once the run is complete.
    pub fn outcome(&self) -> Option<HumanOutcome> {
        if !self.is_complete() {
            return None;
        }
        let error_count = self.error_count();
        Some(HumanOutcome {
            correct_count: self.plugged.len() - error_count,
            error_count,
            misplug_risk: self.workmanship.misplug_risk(),
            bend_violation: self.workmanship.bend_violation,
            elapsed_ms: self.elapsed_ms,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
