//! Teleoperation latency and labor-cost tables.
//!
//! Command latency is a pure function of two closed configuration sets:
//! where the operator sits ([`OperatorLocale`]) and where the robot runs
//! ([`RobotRegion`]). Both sets are frozen at compile time, so the tables
//! live in enum methods rather than a runtime registry.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OperatorLocale
// ---------------------------------------------------------------------------

/// Where the human teleoperator is located. Determines base round-trip
/// latency and the hourly wage used for cost comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorLocale {
    Mexico,
    Canada,
    Philippines,
    India,
    Poland,
    Vietnam,
}

impl OperatorLocale {
    /// All locales, in display order.
    pub const ALL: [OperatorLocale; 6] = [
        OperatorLocale::Mexico,
        OperatorLocale::Canada,
        OperatorLocale::Philippines,
        OperatorLocale::India,
        OperatorLocale::Poland,
        OperatorLocale::Vietnam,
    ];

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            OperatorLocale::Mexico => "Mexico",
            OperatorLocale::Canada => "Canada",
            OperatorLocale::Philippines => "Philippines",
            OperatorLocale::India => "India",
            OperatorLocale::Poland => "Poland",
            OperatorLocale::Vietnam => "Vietnam",
        }
    }

    /// Hourly operator wage in USD.
    pub fn hourly_wage_usd(self) -> f64 {
        match self {
            OperatorLocale::Mexico => 6.29,
            OperatorLocale::Canada => 18.50,
            OperatorLocale::Philippines => 2.80,
            OperatorLocale::India => 3.20,
            OperatorLocale::Poland => 12.40,
            OperatorLocale::Vietnam => 2.50,
        }
    }

    /// Base round-trip command latency in milliseconds, before the
    /// regional modifier is applied.
    pub fn base_latency_ms(self) -> f64 {
        match self {
            OperatorLocale::Mexico => 25.0,
            OperatorLocale::Canada => 20.0,
            OperatorLocale::Philippines => 180.0,
            OperatorLocale::India => 200.0,
            OperatorLocale::Poland => 120.0,
            OperatorLocale::Vietnam => 190.0,
        }
    }
}

// ---------------------------------------------------------------------------
// RobotRegion
// ---------------------------------------------------------------------------

/// Where the robot is deployed. Scales the base latency of whichever
/// locale the operator works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotRegion {
    Texas,
    California,
    NewYork,
    Midwest,
}

impl RobotRegion {
    /// All regions, in display order.
    pub const ALL: [RobotRegion; 4] = [
        RobotRegion::Texas,
        RobotRegion::California,
        RobotRegion::NewYork,
        RobotRegion::Midwest,
    ];

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            RobotRegion::Texas => "Texas",
            RobotRegion::California => "California",
            RobotRegion::NewYork => "New York",
            RobotRegion::Midwest => "Midwest",
        }
    }

    /// Multiplier applied to the locale's base latency.
    pub fn latency_modifier(self) -> f64 {
        match self {
            RobotRegion::Texas => 1.0,
            RobotRegion::California => 1.2,
            RobotRegion::NewYork => 1.1,
            RobotRegion::Midwest => 0.9,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived quantities
// ---------------------------------------------------------------------------

/// Latency at or above this threshold makes real-time teleoperation
/// non-viable for conveyor picking.
pub const VIABILITY_THRESHOLD_MS: f64 = 200.0;

/// Effective round-trip command latency in milliseconds for a
/// locale/region pair, rounded to the nearest whole millisecond.
pub fn effective_latency_ms(locale: OperatorLocale, region: RobotRegion) -> f64 {
    (locale.base_latency_ms() * region.latency_modifier()).round()
}

/// Whether a latency supports viable real-time picking.
pub fn is_viable(latency_ms: f64) -> bool {
    latency_ms < VIABILITY_THRESHOLD_MS
}

/// Effective hourly cost of teleoperated labor: wage divided by pick
/// success rate, with the rate floored at 30% so a cold-start operator
/// does not produce absurd costs. `success_rate` is a fraction in
/// `[0, 1]`; `None` uses the 50% planning default.
pub fn effective_cost_per_hour(locale: OperatorLocale, success_rate: Option<f64>) -> f64 {
    let rate = success_rate.unwrap_or(0.5);
    locale.hourly_wage_usd() / rate.max(0.3)
}

// ===========================================================================
// Tests
// ===========================================================================
