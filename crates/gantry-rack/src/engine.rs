//! Side-by-side comparison engine.
//!
//! Runs one human and one robot against the same cabling task on a shared
//! clock, then projects both installs forward thirty days of operation.
//! All randomness comes from one seeded RNG, so a seed fully determines a
//! session including the thirty-day projection.

use serde::{Deserialize, Serialize};

use crate::RackError;
use crate::human::{HumanOutcome, HumanPhase, HumanTask, Workmanship};
use crate::rng::SimRng;
use crate::robot::{RobotPhase, RobotTask};
use crate::task::PluggedCable;

/// Probability the human install needs a truck roll in thirty days, when
/// the run had a misplug risk or a bend violation.
const HUMAN_ISSUE_P_SLOPPY: f64 = 0.7;
/// Same, for a clean human run.
const HUMAN_ISSUE_P_CLEAN: f64 = 0.3;
/// Probability the robot install develops an issue in thirty days.
const ROBOT_ISSUE_P: f64 = 0.01;

// ---------------------------------------------------------------------------
// Thirty-day projection
// ---------------------------------------------------------------------------

/// Projected thirty-day operational outcome for one install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentOutcome {
    /// Whether an incident occurs in the window.
    pub has_issue: bool,
    /// Mean time to repair if an incident occurs, minutes.
    pub mttr_minutes: u32,
    /// SLA impact of an incident, whole percent.
    pub sla_impact_pct: u32,
}

/// Thirty-day projections for both installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirtyDayReport {
    pub human: IncidentOutcome,
    pub robot: IncidentOutcome,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of a comparison session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub running: bool,
    pub human_phase: HumanPhase,
    pub human_elapsed_ms: f64,
    pub human_plugged: Vec<PluggedCable>,
    pub robot_phase: Option<RobotPhase>,
    pub robot_progress: f64,
    pub robot_scanned_port: Option<u8>,
    pub robot_plugged: Vec<PluggedCable>,
    pub both_complete: bool,
    pub report: Option<ThirtyDayReport>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One human-versus-robot session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEngine {
    rng: SimRng,
    running: bool,
    human: HumanTask,
    robot: RobotTask,
    report: Option<ThirtyDayReport>,
}

impl ComparisonEngine {
    /// Create a session from a seed. Call [`start_both`] to begin.
    ///
    /// [`start_both`]: ComparisonEngine::start_both
    pub fn new(seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let workmanship = Workmanship::draw(&mut rng);
        Self {
            rng,
            running: false,
            human: HumanTask::new(workmanship),
            robot: RobotTask::new(),
            report: None,
        }
    }

    /// Reset both tasks and start the race. The robot begins working on
    /// the first tick; the human's clock starts at their first grab.
    pub fn start_both(&mut self) {
        let workmanship = Workmanship::draw(&mut self.rng);
        self.human = HumanTask::new(workmanship);
        self.robot = RobotTask::new();
        self.report = None;
        self.running = true;
        tracing::debug!("comparison started");
    }

    /// Advance both workers by `dt_ms`. No-op unless running.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.running {
            return;
        }
        self.robot.tick(dt_ms);
        self.human.tick(dt_ms);
    }

    /// Human picks up the next cable.
    pub fn human_grab(&mut self) -> Result<(), RackError> {
        if !self.running {
            return Err(RackError::NotRunning);
        }
        self.human.grab()
    }

    /// Human seats the held cable in `port`.
    pub fn human_plug(&mut self, port: u8) -> Result<PluggedCable, RackError> {
        if !self.running {
            return Err(RackError::NotRunning);
        }
        self.human.plug(port)
    }

    pub fn both_complete(&self) -> bool {
        self.human.is_complete() && self.robot.is_complete()
    }

    /// Project both installs thirty days forward. Requires both tasks to
    /// be complete. The projection is drawn once and then cached.
    pub fn fast_forward_30_days(&mut self) -> Result<&ThirtyDayReport, RackError> {
        if !self.both_complete() {
            return Err(RackError::NotComplete);
        }
        if self.report.is_none() {
            let sloppy = self.human.workmanship().misplug_risk()
                || self.human.workmanship().bend_violation;
            let human_p = if sloppy {
                HUMAN_ISSUE_P_SLOPPY
            } else {
                HUMAN_ISSUE_P_CLEAN
            };

            let human = IncidentOutcome {
                has_issue: self.rng.chance(human_p),
                // 4..=11 hours, reported in minutes.
                mttr_minutes: (self.rng.next_f64() * 8.0 + 4.0) as u32 * 60,
                // 10..=29 percent.
                sla_impact_pct: (self.rng.next_f64() * 20.0 + 10.0) as u32,
            };
            let robot = IncidentOutcome {
                has_issue: self.rng.chance(ROBOT_ISSUE_P),
                // 5..=34 minutes.
                mttr_minutes: (self.rng.next_f64() * 30.0 + 5.0) as u32,
                // 0..=1 percent.
                sla_impact_pct: (self.rng.next_f64() * 2.0) as u32,
            };
            tracing::info!(
                human_issue = human.has_issue,
                robot_issue = robot.has_issue,
                "thirty-day projection drawn"
            );
            self.report = Some(ThirtyDayReport { human, robot });
        }
        // Just populated above when absent.
        match &self.report {
            Some(report) => Ok(report),
            None => Err(RackError::NotComplete),
        }
    }

    pub fn human(&self) -> &HumanTask {
        &self.human
    }

    pub fn robot(&self) -> &RobotTask {
        &self.robot
    }

    pub fn human_outcome(&self) -> Option<HumanOutcome> {
        self.human.outcome()
    }

    pub fn report(&self) -> Option<&ThirtyDayReport> {
        self.report.as_ref()
    }

    /// Capture a snapshot of the session.
    pub fn snapshot(&self) -> ComparisonSnapshot {
        ComparisonSnapshot {
            running: self.running,
            human_phase: self.human.phase(),
            human_elapsed_ms: self.human.elapsed_ms(),
            human_plugged: self.human.plugged().to_vec(),
            robot_phase: self.robot.phase(),
            robot_progress: self.robot.progress(),
            robot_scanned_port: self.robot.scanned_port(),
            robot_plugged: self.robot.plugged().to_vec(),
            both_complete: self.both_complete(),
            report: self.report,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
