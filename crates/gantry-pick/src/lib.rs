//! Latency-compensated teleoperated pick simulator.
//!
//! Objects ride a constant-speed conveyor past a fixed pick zone while a
//! remote operator drives the arm through a command channel with real
//! round-trip latency. Every command the operator issues lands only after
//! the latency of the chosen locale/region pair, so picking at 200 ms is
//! a measurably different job than picking at 20 ms, which is the whole
//! comparison the simulator exists to make.
//!
//! # Architecture
//!
//! - [`locale`] — frozen latency and wage tables for operator locales and
//!   robot regions.
//! - [`command`] — the delay queue: issued commands wait out their latency
//!   and are invalidated by run-generation bumps.
//! - [`conveyor`] — track geometry and per-object belt advancement.
//! - [`arm`] — the bounded-step seek actuator.
//! - [`event`] — typed events in a ring buffer, drained per frame.
//! - [`engine`] — [`engine::PickEngine`], the single owner of all mutable
//!   state, advanced by host-driven `tick(dt)` calls.
//! - [`query`] — owned read-only snapshots for rendering.
//!
//! # Determinism
//!
//! Given the same configuration, the same command issue times, and the
//! same sequence of `tick` deltas, a run is fully reproducible: there is
//! no randomness and no internal clock.

pub mod arm;
pub mod command;
pub mod conveyor;
pub mod engine;
pub mod event;
pub mod locale;
pub mod query;

pub use command::Command;
pub use engine::{PickEngine, PickStats};
pub use locale::{OperatorLocale, RobotRegion};
pub use query::PickSnapshot;
