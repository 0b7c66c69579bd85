//! Read-only snapshots for rendering and inspection.
//!
//! Snapshots are owned copies: cheap at this scale (a handful of objects)
//! and they keep renderers off the engine's internals.

use serde::{Deserialize, Serialize};

use crate::conveyor::ObjectStatus;
use crate::engine::{PickEngine, PickStats};
use crate::locale;

/// One conveyor object as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub serial: u64,
    pub position: f64,
    pub grip_point: f64,
    pub status: ObjectStatus,
}

/// Full engine state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickSnapshot {
    pub clock_ms: f64,
    pub running: bool,

    pub latency_ms: f64,
    /// Whether the current latency supports viable real-time picking.
    pub viable: bool,

    /// Objects in spawn order.
    pub objects: Vec<ObjectView>,
    pub arm_position: f64,
    pub arm_target: f64,
    pub held_serial: Option<u64>,
    pub grasping: bool,

    pub stats: PickStats,
    /// Success fraction in `[0, 1]`, `None` before any attempt resolves.
    pub success_rate: Option<f64>,
    /// Wage adjusted for the observed (or default) success rate.
    pub effective_cost_per_hour: f64,
}

impl PickSnapshot {
    /// Capture the engine's current state.
    pub fn capture(engine: &PickEngine) -> Self {
        let mut objects: Vec<ObjectView> = engine
            .objects()
            .values()
            .map(|obj| ObjectView {
                serial: obj.serial,
                position: obj.position,
                grip_point: obj.grip_point(),
                status: obj.status,
            })
            .collect();
        objects.sort_by_key(|view| view.serial);

        let latency_ms = engine.latency_ms();
        let stats = engine.stats();
        let success_rate = stats.success_rate();
        let arm = engine.arm();

        Self {
            clock_ms: engine.clock_ms(),
            running: engine.is_running(),
            latency_ms,
            viable: locale::is_viable(latency_ms),
            objects,
            arm_position: arm.position,
            arm_target: arm.target,
            held_serial: engine.held_serial(),
            grasping: engine.is_grasping(),
            stats,
            success_rate,
            effective_cost_per_hour: locale::effective_cost_per_hour(
                engine.operator_locale(),
                success_rate,
            ),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
