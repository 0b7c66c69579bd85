//! Manufacturing learning-curve cost projections.
//!
//! Each platform's cost declines by a fixed annual factor from a 2024
//! baseline. The span is closed on both ends; projections outside it are
//! an error rather than an extrapolation.

use serde::{Deserialize, Serialize};

use crate::EconError;

/// First year of the projection span (the baseline year).
pub const FIRST_YEAR: u16 = 2024;
/// Last year of the projection span.
pub const LAST_YEAR: u16 = 2035;

/// Robot hardware platforms with published baseline costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotPlatform {
    /// Dual six-axis cobot arms on a fixed mount.
    CobotArms,
    /// Wheeled-base humanoid.
    WheeledHumanoid,
    /// Entry-level legged humanoid.
    LeggedBasic,
    /// Full-size advanced legged humanoid.
    LeggedAdvanced,
}

impl RobotPlatform {
    /// All platforms, in baseline-cost order.
    pub const ALL: [RobotPlatform; 4] = [
        RobotPlatform::CobotArms,
        RobotPlatform::LeggedBasic,
        RobotPlatform::WheeledHumanoid,
        RobotPlatform::LeggedAdvanced,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RobotPlatform::CobotArms => "Dual Cobot Arms",
            RobotPlatform::WheeledHumanoid => "Wheeled Humanoid",
            RobotPlatform::LeggedBasic => "Basic Legged Humanoid",
            RobotPlatform::LeggedAdvanced => "Advanced Legged Humanoid",
        }
    }

    /// Baseline cost in the first projection year, USD.
    pub fn base_cost_usd(self) -> f64 {
        match self {
            RobotPlatform::CobotArms => 15_000.0,
            RobotPlatform::WheeledHumanoid => 45_000.0,
            RobotPlatform::LeggedBasic => 21_600.0,
            RobotPlatform::LeggedAdvanced => 150_000.0,
        }
    }

    /// Year-over-year cost multiplier. Lower means a steeper curve.
    pub fn learning_rate(self) -> f64 {
        match self {
            RobotPlatform::CobotArms => 0.88,
            RobotPlatform::WheeledHumanoid => 0.85,
            RobotPlatform::LeggedBasic => 0.90,
            RobotPlatform::LeggedAdvanced => 0.82,
        }
    }
}

/// Projected cost of a platform in a given year, rounded to whole
/// dollars.
pub fn projected_cost(platform: RobotPlatform, year: u16) -> Result<f64, EconError> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return Err(EconError::YearOutOfSpan {
            year,
            first: FIRST_YEAR,
            last: LAST_YEAR,
        });
    }
    let years_out = f64::from(year - FIRST_YEAR);
    Ok((platform.base_cost_usd() * platform.learning_rate().powf(years_out)).round())
}

/// All platforms ranked cheapest first for a given year.
pub fn ranking(year: u16) -> Result<Vec<(RobotPlatform, f64)>, EconError> {
    let mut ranked = Vec::with_capacity(RobotPlatform::ALL.len());
    for platform in RobotPlatform::ALL {
        ranked.push((platform, projected_cost(platform, year)?));
    }
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(ranked)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Test 1: baseline year returns the base cost
    // -----------------------------------------------------------------------
    #[test]
    fn baseline_year_is_base_cost() {
        for platform in RobotPlatform::ALL {
            assert_eq!(
                projected_cost(platform, FIRST_YEAR).unwrap(),
                platform.base_cost_usd()
            );
        }
    }

    // -----------------------------------------------------------------------
    // Test 2: known point on the curve
    // -----------------------------------------------------------------------
    #[test]
    fn known_curve_points() {
        // 15000 * 0.88^1
        assert_eq!(
            projected_cost(RobotPlatform::CobotArms, 2025).unwrap(),
            13_200.0
        );
        // 15000 * 0.88^2
        assert_eq!(
            projected_cost(RobotPlatform::CobotArms, 2026).unwrap(),
            11_616.0
        );
    }

    // -----------------------------------------------------------------------
    // Test 3: out-of-span years rejected
    // -----------------------------------------------------------------------
    #[test]
    fn out_of_span_rejected() {
        assert!(matches!(
            projected_cost(RobotPlatform::CobotArms, 2023),
            Err(EconError::YearOutOfSpan { year: 2023, .. })
        ));
        assert!(matches!(
            projected_cost(RobotPlatform::CobotArms, 2036),
            Err(EconError::YearOutOfSpan { year: 2036, .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Test 4: ranking is cheapest-first and complete
    // -----------------------------------------------------------------------
    #[test]
    fn ranking_cheapest_first() {
        let ranked = ranking(2024).unwrap();
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].0, RobotPlatform::CobotArms);
        assert_eq!(ranked[3].0, RobotPlatform::LeggedAdvanced);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    // -----------------------------------------------------------------------
    // Test 5: steeper curves close the gap over time
    // -----------------------------------------------------------------------
    #[test]
    fn advanced_legged_narrows_gap() {
        // 0.82 vs 0.85: the expensive platform falls faster in ratio
        // terms than the wheeled one.
        let early_ratio = projected_cost(RobotPlatform::LeggedAdvanced, 2024).unwrap()
            / projected_cost(RobotPlatform::WheeledHumanoid, 2024).unwrap();
        let late_ratio = projected_cost(RobotPlatform::LeggedAdvanced, 2035).unwrap()
            / projected_cost(RobotPlatform::WheeledHumanoid, 2035).unwrap();
        assert!(late_ratio < early_ratio);
    }

    // -----------------------------------------------------------------------
    // Test 6: costs decline monotonically over the span
    // -----------------------------------------------------------------------
    proptest! {
        #[test]
        fn costs_decline_year_over_year(year in FIRST_YEAR..LAST_YEAR) {
            for platform in RobotPlatform::ALL {
                let now = projected_cost(platform, year).unwrap();
                let next = projected_cost(platform, year + 1).unwrap();
                prop_assert!(next <= now);
            }
        }
    }
}
