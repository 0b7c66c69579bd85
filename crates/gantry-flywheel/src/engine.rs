//! The flywheel propagation engine.
//!
//! [`FlywheelEngine`] owns a validated graph plus all mutable state and
//! advances only in whole quarters. Each [`FlywheelEngine::advance_quarter`]
//! runs a fixed phase order:
//!
//! 1. Increment the quarter counter.
//! 2. Resolve pending effects that have come due, clamping floored nodes.
//! 3. Book quarterly revenue off the revenue-driver node.
//! 4. Propagate: every node deviating from its base emits one pending
//!    effect per outgoing edge, unit-converted and due `lag` quarters out.
//! 5. Record a history sample per node.
//!
//! Resolution runs before propagation, so an effect created in quarter N
//! with lag L lands exactly at quarter N + L, and a node moved by this
//! quarter's resolution starts emitting in the same quarter.

use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::FlywheelError;
use crate::graph::{FlywheelGraph, NodeKey, Unit, convert_units, default_graph};
use crate::history::History;
use crate::metrics::{self, FlywheelMetrics};

/// Investable budget at the start of a session, in dollars.
pub const STARTING_BUDGET: f64 = 500_000.0;
/// Cost of one investment action, in dollars.
pub const INVEST_COST: f64 = 50_000.0;
/// Deviations strictly below this magnitude are treated as settled and
/// do not propagate.
pub const DEVIATION_EPSILON: f64 = 0.01;
/// Auto-play cadence.
pub const AUTO_PLAY_INTERVAL_MS: f64 = 2_000.0;
/// Auto-play stops once this many quarters have elapsed. Manual advances
/// are never capped.
pub const MAX_AUTO_PLAY_QUARTERS: u32 = 20;

// ---------------------------------------------------------------------------
// Supporting records
// ---------------------------------------------------------------------------

/// An effect in flight between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub source: NodeKey,
    pub target: NodeKey,
    /// Delta already unit-converted into the target's units.
    pub delta: f64,
    /// Quarter at which the delta lands on the target.
    pub due_quarter: u32,
}

/// One record in the append-only session ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEntry {
    /// A direct investment into a node.
    Investment {
        quarter: u32,
        node: String,
        amount: f64,
    },
    /// A quarter advance and the revenue it booked.
    QuarterAdvance { quarter: u32, revenue: f64 },
}

/// One node's state as a client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: String,
    pub label: String,
    pub unit: Unit,
    pub base: f64,
    pub value: f64,
    pub deviation: f64,
    /// Recent quarterly samples, oldest first.
    pub history: Vec<f64>,
}

/// Full engine state at one instant, nodes in definition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlywheelSnapshot {
    pub quarter: u32,
    pub auto_play: bool,
    pub nodes: Vec<NodeState>,
    pub metrics: FlywheelMetrics,
    pub pending_effects: usize,
    pub ledger: Vec<LedgerEntry>,
}

// ---------------------------------------------------------------------------
// FlywheelEngine
// ---------------------------------------------------------------------------

/// Quarter-stepped propagation engine over a validated graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlywheelEngine {
    graph: FlywheelGraph,
    values: SecondaryMap<NodeKey, f64>,
    histories: SecondaryMap<NodeKey, History>,

    quarter: u32,
    budget: f64,
    invested: f64,
    revenue: f64,

    pending: Vec<PendingEffect>,
    ledger: Vec<LedgerEntry>,

    auto_play: bool,
    /// Wall clock of the last auto-play advance, from the host's epoch.
    last_auto_ms: Option<f64>,
}

impl FlywheelEngine {
    /// Create an engine over the given graph, all nodes at base.
    pub fn new(graph: FlywheelGraph) -> Self {
        let mut values = SecondaryMap::new();
        let mut histories = SecondaryMap::new();
        for key in graph.keys() {
            let base = graph.node(key).base;
            values.insert(key, base);
            histories.insert(key, History::seeded(base));
        }
        Self {
            graph,
            values,
            histories,
            quarter: 0,
            budget: STARTING_BUDGET,
            invested: 0.0,
            revenue: 0.0,
            pending: Vec::new(),
            ledger: Vec::new(),
            auto_play: false,
            last_auto_ms: None,
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Invest in a node: deduct the fixed cost, apply the node's own
    /// investment step immediately, and record a ledger entry.
    ///
    /// Returns `Ok(false)` without side effects when the budget cannot
    /// cover the cost; errors only on an unknown node id.
    pub fn invest(&mut self, node_id: &str) -> Result<bool, FlywheelError> {
        let key = self
            .graph
            .lookup(node_id)
            .ok_or_else(|| FlywheelError::UnknownNode(node_id.to_owned()))?;

        if self.budget < INVEST_COST {
            trace!(node = node_id, budget = self.budget, "investment declined");
            return Ok(false);
        }

        self.budget -= INVEST_COST;
        self.invested += INVEST_COST;

        let def = self.graph.node(key);
        let value = self.values[key] + def.invest_effect;
        self.values[key] = def.clamp(value);
        if let Some(history) = self.histories.get_mut(key) {
            history.push(self.values[key]);
        }

        self.ledger.push(LedgerEntry::Investment {
            quarter: self.quarter,
            node: def.id.clone(),
            amount: INVEST_COST,
        });
        debug!(node = node_id, value = self.values[key], "invested");
        Ok(true)
    }

    /// Advance one quarter. See the module docs for the phase order.
    pub fn advance_quarter(&mut self) {
        self.quarter += 1;
        self.resolve_pending();
        self.book_revenue();
        self.propagate();
        self.record_history();
        debug!(
            quarter = self.quarter,
            pending = self.pending.len(),
            revenue = self.revenue,
            "quarter advanced"
        );
    }

    /// Return everything to its initial state: values at base, budget
    /// restored, ledger and in-flight effects cleared, auto-play off.
    pub fn reset(&mut self) {
        for key in self.graph.keys() {
            let base = self.graph.node(key).base;
            self.values[key] = base;
            self.histories[key] = History::seeded(base);
        }
        self.quarter = 0;
        self.budget = STARTING_BUDGET;
        self.invested = 0.0;
        self.revenue = 0.0;
        self.pending.clear();
        self.ledger.clear();
        self.auto_play = false;
        self.last_auto_ms = None;
        debug!("engine reset");
    }

    // -----------------------------------------------------------------------
    // Auto-play
    // -----------------------------------------------------------------------

    /// Enable or disable auto-play. Either way the cadence timer restarts
    /// on the next poll.
    pub fn set_auto_play(&mut self, enabled: bool) {
        self.auto_play = enabled;
        self.last_auto_ms = None;
    }

    pub fn is_auto_play(&self) -> bool {
        self.auto_play
    }

    /// Drive auto-play from the host clock. Advances at most one quarter
    /// per poll, once the cadence interval has elapsed; returns whether a
    /// quarter was advanced. Auto-play disables itself at the quarter cap.
    pub fn poll_auto_play(&mut self, now_ms: f64) -> bool {
        if !self.auto_play {
            return false;
        }
        if self.quarter >= MAX_AUTO_PLAY_QUARTERS {
            self.auto_play = false;
            return false;
        }
        match self.last_auto_ms {
            None => {
                // First poll arms the cadence timer.
                self.last_auto_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms - last >= AUTO_PLAY_INTERVAL_MS => {
                self.last_auto_ms = Some(now_ms);
                self.advance_quarter();
                if self.quarter >= MAX_AUTO_PLAY_QUARTERS {
                    self.auto_play = false;
                }
                true
            }
            Some(_) => false,
        }
    }

    // -----------------------------------------------------------------------
    // Phases
    // -----------------------------------------------------------------------

    fn resolve_pending(&mut self) {
        let quarter = self.quarter;
        let mut due = Vec::new();
        self.pending.retain(|effect| {
            if effect.due_quarter <= quarter {
                due.push(*effect);
                false
            } else {
                true
            }
        });

        for effect in due {
            let def = self.graph.node(effect.target);
            let value = self.values[effect.target] + effect.delta;
            self.values[effect.target] = def.clamp(value);
            trace!(
                target = def.id.as_str(),
                delta = effect.delta,
                value = self.values[effect.target],
                "effect resolved"
            );
        }
    }

    fn book_revenue(&mut self) {
        let quarterly = self
            .graph
            .revenue_node()
            .map(|key| metrics::quarterly_revenue(self.values[key]))
            .unwrap_or(0.0);
        self.revenue += quarterly;
        self.ledger.push(LedgerEntry::QuarterAdvance {
            quarter: self.quarter,
            revenue: quarterly,
        });
    }

    /// Every node still deviating from base re-emits on each outgoing
    /// edge every quarter; persistent deviations compound rather than
    /// fire once.
    fn propagate(&mut self) {
        for edge in self.graph.edges() {
            let source = self.graph.node(edge.from);
            let deviation = self.values[edge.from] - source.base;
            if deviation.abs() < DEVIATION_EPSILON {
                continue;
            }
            let target = self.graph.node(edge.to);
            let delta = convert_units(deviation * edge.weight, source.unit, target.unit);
            self.pending.push(PendingEffect {
                source: edge.from,
                target: edge.to,
                delta,
                due_quarter: self.quarter + edge.lag,
            });
        }
    }

    fn record_history(&mut self) {
        for key in self.graph.keys() {
            let value = self.values[key];
            if let Some(history) = self.histories.get_mut(key) {
                history.push(value);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Current value of a node by id.
    pub fn value(&self, node_id: &str) -> Option<f64> {
        self.graph.lookup(node_id).map(|key| self.values[key])
    }

    /// Session history records, oldest first.
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Effects still in flight.
    pub fn pending_effects(&self) -> &[PendingEffect] {
        &self.pending
    }

    pub fn graph(&self) -> &FlywheelGraph {
        &self.graph
    }

    /// Derived metrics for the current quarter. Revenue counts everything
    /// booked so far plus the current quarter's projection.
    pub fn metrics(&self) -> FlywheelMetrics {
        let quarterly = self
            .graph
            .revenue_node()
            .map(|key| metrics::quarterly_revenue(self.values[key]))
            .unwrap_or(0.0);
        let total_revenue = self.revenue + quarterly;
        let payback = self
            .graph
            .capex_node()
            .and_then(|key| metrics::payback_months(self.values[key], quarterly));
        FlywheelMetrics {
            quarter: self.quarter,
            budget_remaining: self.budget,
            total_invested: self.invested,
            total_revenue,
            quarterly_revenue: quarterly,
            roi_percent: metrics::roi_percent(total_revenue, self.invested),
            payback_months: payback,
        }
    }

    /// Owned snapshot of the whole engine, nodes in definition order.
    pub fn snapshot(&self) -> FlywheelSnapshot {
        let nodes = self
            .graph
            .keys()
            .map(|key| {
                let def = self.graph.node(key);
                NodeState {
                    id: def.id.clone(),
                    label: def.label.clone(),
                    unit: def.unit,
                    base: def.base,
                    value: self.values[key],
                    deviation: self.values[key] - def.base,
                    history: self.histories[key].samples().to_vec(),
                }
            })
            .collect();
        FlywheelSnapshot {
            quarter: self.quarter,
            auto_play: self.auto_play,
            nodes,
            metrics: self.metrics(),
            pending_effects: self.pending.len(),
            ledger: self.ledger.clone(),
        }
    }
}

impl Default for FlywheelEngine {
    fn default() -> Self {
        Self::new(default_graph())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
