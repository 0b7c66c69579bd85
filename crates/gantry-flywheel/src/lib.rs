//! Flywheel propagation engine for robotics unit economics.
//!
//! A small directed graph of economic quantities (capex, financing cost,
//! deployments, manufacturing scale, supply-chain health) evolves in
//! discrete quarters. Investing nudges a node off its base value; every
//! deviation then travels the graph's weighted edges with a per-edge lag,
//! getting unit-converted on the way, so a capital injection today shows
//! up as cheaper financing next quarter and more deployments the quarter
//! after. The point is to make the compounding visible.
//!
//! # Architecture
//!
//! - [`graph`] — node/edge definitions, validation, unit conversion, and
//!   the default five-node economy.
//! - [`history`] — bounded per-node sample windows for sparklines.
//! - [`engine`] — [`engine::FlywheelEngine`]: invest, quarter stepping,
//!   auto-play, ledger, reset.
//! - [`metrics`] — pure revenue/ROI/payback derivations with guarded
//!   division.
//! - [`data_loader`] — JSON graph definitions (feature `data-loader`).
//!
//! # Determinism
//!
//! Quarter stepping is purely a function of prior state; auto-play takes
//! the host clock as an argument instead of owning a timer, so replays
//! are exact.

pub mod engine;
pub mod error;
pub mod graph;
pub mod history;
pub mod metrics;

#[cfg(feature = "data-loader")]
pub mod data_loader;

pub use engine::{FlywheelEngine, FlywheelSnapshot, LedgerEntry};
pub use error::FlywheelError;
pub use graph::{FlywheelGraph, GraphSpec, Unit, default_graph, default_spec};
pub use metrics::FlywheelMetrics;
