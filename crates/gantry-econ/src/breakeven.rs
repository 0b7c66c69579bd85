//! Human-vs-robot total cost of ownership model.
//!
//! Compares a human worker's fully-loaded yearly cost against a robot's
//! operating cost (straight-line depreciation, maintenance as a share of
//! purchase price, and the teleoperator wage amortized over the robots
//! each operator supervises). The robot's output is discounted for speed
//! and pick success, then credited for running longer shifts than a
//! human's eight hours.

use serde::{Deserialize, Serialize};

use crate::EconError;

/// Working days per year in both cost models.
pub const WORK_DAYS_PER_YEAR: f64 = 250.0;
/// Straight-line depreciation horizon, in years.
pub const DEPRECIATION_YEARS: f64 = 3.0;
/// Annual maintenance as a fraction of purchase price.
pub const MAINTENANCE_RATE: f64 = 0.15;
/// A human shift, in hours.
pub const HUMAN_HOURS_PER_DAY: f64 = 8.0;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Model inputs. The defaults mirror a mid-market US warehouse with
/// teleoperators in Mexico.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenInputs {
    /// Human hourly wage, USD.
    pub human_wage_per_hour: f64,
    /// Robot purchase price, USD.
    pub robot_cost: f64,
    /// How much slower the robot works than a human, percent.
    pub speed_discount_pct: f64,
    /// Robot pick success rate, percent.
    pub success_rate_pct: f64,
    /// Robot operating hours per day.
    pub robot_hours_per_day: f64,
    /// Robots supervised per teleoperator.
    pub teleop_ratio: f64,
    /// Teleoperator hourly wage, USD.
    pub teleop_wage_per_hour: f64,
}

impl Default for BreakevenInputs {
    fn default() -> Self {
        Self {
            human_wage_per_hour: 25.0,
            robot_cost: 45_000.0,
            speed_discount_pct: 30.0,
            success_rate_pct: 85.0,
            robot_hours_per_day: 16.0,
            teleop_ratio: 3.0,
            teleop_wage_per_hour: 6.29,
        }
    }
}

impl BreakevenInputs {
    fn validate(&self) -> Result<(), EconError> {
        let positive = |name, value: f64| {
            if value > 0.0 {
                Ok(())
            } else {
                Err(EconError::NonPositive { name, value })
            }
        };
        let pct = |name, value: f64| {
            if (0.0..=100.0).contains(&value) {
                Ok(())
            } else {
                Err(EconError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max: 100.0,
                })
            }
        };

        positive("human_wage_per_hour", self.human_wage_per_hour)?;
        positive("robot_cost", self.robot_cost)?;
        pct("speed_discount_pct", self.speed_discount_pct)?;
        pct("success_rate_pct", self.success_rate_pct)?;
        if !(0.0..=24.0).contains(&self.robot_hours_per_day)
            || self.robot_hours_per_day == 0.0
        {
            return Err(EconError::OutOfRange {
                name: "robot_hours_per_day",
                value: self.robot_hours_per_day,
                min: 0.0,
                max: 24.0,
            });
        }
        positive("teleop_ratio", self.teleop_ratio)?;
        positive("teleop_wage_per_hour", self.teleop_wage_per_hour)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// One month on the cumulative cost chart, dollars rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostPoint {
    pub month: u32,
    pub human: f64,
    pub robot: f64,
}

/// Derived cost structure and breakeven horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenAnalysis {
    /// Fully-loaded human cost per year.
    pub human_yearly_cost: f64,
    /// Robot opex per year: depreciation, maintenance, teleop labor.
    pub robot_yearly_cost: f64,
    /// Straight-line depreciation per year.
    pub depreciation_per_year: f64,
    /// Robot output as a multiple of one human worker.
    pub output_ratio: f64,
    /// Months until cumulative robot cost drops below cumulative human
    /// cost. Clamped at zero; very large values mean "effectively never".
    pub breakeven_months: f64,
}

impl BreakevenAnalysis {
    /// Derive the analysis. Errors on invalid inputs, never divides by
    /// zero afterwards.
    pub fn derive(inputs: &BreakevenInputs) -> Result<Self, EconError> {
        inputs.validate()?;

        let human_yearly_cost =
            inputs.human_wage_per_hour * HUMAN_HOURS_PER_DAY * WORK_DAYS_PER_YEAR;
        let robot_hours_per_year = inputs.robot_hours_per_day * WORK_DAYS_PER_YEAR;
        let robot_efficiency =
            (1.0 - inputs.speed_discount_pct / 100.0) * (inputs.success_rate_pct / 100.0);
        let depreciation_per_year = inputs.robot_cost / DEPRECIATION_YEARS;
        let maintenance_per_year = inputs.robot_cost * MAINTENANCE_RATE;
        let teleop_cost_per_year =
            inputs.teleop_wage_per_hour * robot_hours_per_year / inputs.teleop_ratio;
        let robot_yearly_cost = depreciation_per_year + maintenance_per_year + teleop_cost_per_year;
        let output_ratio = robot_efficiency * (inputs.robot_hours_per_day / HUMAN_HOURS_PER_DAY);

        // Yearly savings can be zero or negative; the floor keeps the
        // quotient finite and the UI renders the result as "never".
        let yearly_savings = (human_yearly_cost * output_ratio - robot_yearly_cost
            + depreciation_per_year)
            .max(0.01);
        let breakeven_months = (inputs.robot_cost / yearly_savings * 12.0).max(0.0);

        Ok(Self {
            human_yearly_cost,
            robot_yearly_cost,
            depreciation_per_year,
            output_ratio,
            breakeven_months,
        })
    }

    /// Cumulative cost series for months `0..=months`. Human cost accrues
    /// from zero; robot cost starts at the purchase price and accrues
    /// opex net of depreciation (the purchase is already on the books).
    pub fn cost_series(&self, inputs: &BreakevenInputs, months: u32) -> Vec<CostPoint> {
        let human_monthly = self.human_yearly_cost / 12.0;
        let robot_monthly = (self.robot_yearly_cost - self.depreciation_per_year) / 12.0;
        (0..=months)
            .map(|month| CostPoint {
                month,
                human: (human_monthly * f64::from(month)).round(),
                robot: (inputs.robot_cost + robot_monthly * f64::from(month)).round(),
            })
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
