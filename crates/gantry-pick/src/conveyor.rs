//! Conveyor objects and track geometry.
//!
//! The belt runs left to right across a 600-unit visible span. Objects
//! enter just off the left edge, move at a constant speed, and are removed
//! once they pass the right edge. A fixed pick zone sits mid-track; an
//! object whose grip point clears the zone (plus a small margin) without
//! being captured is counted as a miss exactly once.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a live object on the conveyor.
    pub struct ObjectKey;
}

// ---------------------------------------------------------------------------
// Track geometry
// ---------------------------------------------------------------------------

/// Track constants, in track units (the visible span is `0..600`).
pub mod track {
    /// Belt speed in track units per second.
    pub const CONVEYOR_SPEED: f64 = 80.0;
    /// Milliseconds between object spawns.
    pub const SPAWN_INTERVAL_MS: f64 = 800.0;
    /// X coordinate where new objects enter, just off the visible span.
    pub const SPAWN_X: f64 = -30.0;
    /// Objects strictly past this point are removed, whatever their status.
    pub const EXIT_X: f64 = 620.0;
    /// Inclusive grip-point band where a capture can succeed.
    pub const PICK_ZONE_START: f64 = 285.0;
    /// Inclusive end of the pick zone.
    pub const PICK_ZONE_END: f64 = 315.0;
    /// Margin past the pick zone after which an uncaptured object is missed.
    pub const MISS_MARGIN: f64 = 20.0;
    /// Offset from an object's position to its grip point (its center).
    pub const GRIP_OFFSET: f64 = 15.0;
    /// Lower clamp for commanded arm positions.
    pub const MOVE_MIN_X: f64 = 60.0;
    /// Upper clamp for commanded arm positions.
    pub const MOVE_MAX_X: f64 = 540.0;
    /// Maximum grip-point distance from the arm for a capture.
    pub const CAPTURE_RADIUS: f64 = 20.0;
}

// ---------------------------------------------------------------------------
// ConveyorObject
// ---------------------------------------------------------------------------

/// Lifecycle state of a conveyor object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectStatus {
    /// Riding the belt, still capturable.
    Moving,
    /// Captured by the arm; tracks the arm instead of the belt.
    Held,
    /// Cleared the pick zone uncaptured. Rides the belt to the exit.
    Missed,
}

/// One object on the belt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConveyorObject {
    /// Creation-order serial, unique and monotonic across the engine's
    /// lifetime. Used for capture tie-breaks and stable client identity.
    pub serial: u64,
    /// Leading-edge track coordinate.
    pub position: f64,
    pub status: ObjectStatus,
}

impl ConveyorObject {
    /// Spawn a fresh object at the track entry.
    pub fn spawn(serial: u64) -> Self {
        Self {
            serial,
            position: track::SPAWN_X,
            status: ObjectStatus::Moving,
        }
    }

    /// Track coordinate of the object's grip point.
    pub fn grip_point(&self) -> f64 {
        self.position + track::GRIP_OFFSET
    }

    /// Whether the grip point is inside the pick zone (inclusive).
    pub fn in_pick_zone(&self) -> bool {
        let grip = self.grip_point();
        (track::PICK_ZONE_START..=track::PICK_ZONE_END).contains(&grip)
    }

    /// Whether the object has cleared the pick zone plus the miss margin.
    pub fn past_miss_boundary(&self) -> bool {
        self.position > track::PICK_ZONE_END + track::MISS_MARGIN
    }

    /// Whether the object has left the track.
    pub fn past_exit(&self) -> bool {
        self.position > track::EXIT_X
    }
}

// ---------------------------------------------------------------------------
// Per-tick advancement
// ---------------------------------------------------------------------------

/// What happened to a free (non-held) object during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAdvance {
    /// Still on the belt, nothing to report.
    OnBelt,
    /// Crossed the miss boundary this tick; its status is now `Missed`.
    JustMissed,
    /// Past the track exit; remove it.
    Exited,
}

/// Advance a free object by `dt_ms` of belt travel.
///
/// The miss transition fires before the exit check, so an object that
/// somehow covers both boundaries in one oversized tick is still counted
/// as a miss and removed on the following tick.
pub fn advance_free_object(obj: &mut ConveyorObject, dt_ms: f64) -> ObjectAdvance {
    obj.position += track::CONVEYOR_SPEED * dt_ms / 1000.0;

    if obj.status == ObjectStatus::Moving && obj.past_miss_boundary() {
        obj.status = ObjectStatus::Missed;
        return ObjectAdvance::JustMissed;
    }
    if obj.past_exit() {
        return ObjectAdvance::Exited;
    }
    ObjectAdvance::OnBelt
}

// ===========================================================================
// Tests
// ===========================================================================
