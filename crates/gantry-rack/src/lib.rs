//! Human-versus-robot rack cabling comparison.
//!
//! Simulates the same three-cable patch-panel job done two ways: a slow,
//! deterministic teleoperated robot and a fast, fallible human, racing on
//! a shared clock. Once both finish, the session projects each install
//! thirty days forward to compare operational risk.
//!
//! # Architecture
//!
//! - [`task`] — the shared job: cables, ports, plug records.
//! - [`robot`] — the robot's fixed-rate phase machine.
//! - [`human`] — the interactive grab/plug flow and workmanship draws.
//! - [`engine`] — the session driver and thirty-day projection.
//! - [`rng`] — seeded SplitMix64; a seed fully determines a session.

use thiserror::Error;

pub mod engine;
pub mod human;
pub mod rng;
pub mod robot;
pub mod task;

pub use engine::{ComparisonEngine, ComparisonSnapshot, IncidentOutcome, ThirtyDayReport};
pub use human::{HumanOutcome, HumanPhase, HumanTask, Workmanship};
pub use rng::SimRng;
pub use robot::{RobotPhase, RobotTask};
pub use task::{CABLES, CableSpec, PORT_COUNT, PluggedCable};

/// Errors from driving a comparison session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RackError {
    /// The session has not been started.
    #[error("session is not running")]
    NotRunning,

    /// Tried to grab while already holding a cable, or with none left.
    #[error("no cable available to grab")]
    NotIdle,

    /// Tried to plug without holding a cable.
    #[error("no cable in hand to plug")]
    NotHolding,

    /// The port number is not on the panel.
    #[error("port {port} is not on the panel (1..=24)")]
    InvalidPort { port: u8 },

    /// The thirty-day projection needs both tasks finished.
    #[error("both tasks must be complete before fast-forwarding")]
    NotComplete,
}
