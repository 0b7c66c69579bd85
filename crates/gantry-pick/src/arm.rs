//! Pick arm actuator.
//!
//! The arm seeks its commanded target at a bounded per-tick step and snaps
//! when close enough, so it settles exactly on target instead of
//! oscillating around it.

use serde::{Deserialize, Serialize};

/// Rest position over the middle of the pick zone.
pub const HOME_X: f64 = 300.0;
/// Maximum travel per tick, in track units.
pub const MAX_STEP: f64 = 2.5;
/// Within this distance of the target the arm snaps onto it.
pub const SNAP_EPSILON: f64 = 1.0;

/// Arm actuator state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    /// Current track coordinate.
    pub position: f64,
    /// Commanded track coordinate (already clamped by the engine).
    pub target: f64,
}

impl Arm {
    /// Arm parked at home.
    pub fn at_home() -> Self {
        Self {
            position: HOME_X,
            target: HOME_X,
        }
    }

    /// Retarget the arm. Takes effect over subsequent ticks.
    pub fn set_target(&mut self, x: f64) {
        self.target = x;
    }

    /// Advance one tick toward the target.
    pub fn advance(&mut self) {
        let diff = self.target - self.position;
        if diff.abs() < SNAP_EPSILON {
            self.position = self.target;
        } else {
            self.position += diff.signum() * diff.abs().min(MAX_STEP);
        }
    }

    /// Whether the arm has settled on its target.
    pub fn settled(&self) -> bool {
        self.position == self.target
    }
}

impl Default for Arm {
    fn default() -> Self {
        Self::at_home()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
