//! Closed-form unit-economics models for teleoperated robotics.
//!
//! Two independent calculators:
//!
//! - [`breakeven`] — human labor versus robot total cost of ownership,
//!   with the breakeven horizon and cumulative cost series.
//! - [`costcurve`] — manufacturing learning curves projecting hardware
//!   costs per platform across years.
//!
//! All functions are pure: inputs are validated up front and results are
//! plain data, so callers can re-derive everything on every slider move.

use thiserror::Error;

pub mod breakeven;
pub mod costcurve;

pub use breakeven::{BreakevenAnalysis, BreakevenInputs, CostPoint};
pub use costcurve::RobotPlatform;

/// Validation errors for model inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EconError {
    /// The named input must be strictly positive.
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    /// The named input fell outside its accepted range.
    #[error("{name} must be within {min}..={max} (got {value})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Cost projections cover a fixed span of years.
    #[error("year {year} is outside the projection span {first}..={last}")]
    YearOutOfSpan { year: u16, first: u16, last: u16 },
}
