//! Economic graph definitions and validation.
//!
//! The graph is frozen at construction: nodes carry a unit, a base value,
//! and an investment step; directed edges carry a weight and a delivery
//! lag in quarters. [`GraphSpec`] is the serde-facing definition;
//! [`FlywheelGraph`] is the validated, key-indexed form the engine runs on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::error::FlywheelError;

new_key_type! {
    /// Identifies a node in a validated graph.
    pub struct NodeKey;
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Unit of a node's value. Effects crossing a unit boundary are scaled so
/// a dollar-sized deviation does not land raw on a percentage node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Absolute dollars.
    #[serde(rename = "$")]
    Dollars,
    /// A percentage such as an interest rate or uptime share.
    #[serde(rename = "%")]
    Percent,
    /// A plain count.
    #[serde(rename = "units")]
    Count,
    /// A dimensionless multiplier.
    #[serde(rename = "x")]
    Multiplier,
}

/// Scale a deviation crossing from `source` units into `target` units.
///
/// The rules form an if/else chain on the target: dollars absorb
/// thousands, percentages shed thousands coming from dollars, and
/// multipliers shrink everything by a hundred.
pub fn convert_units(delta: f64, source: Unit, target: Unit) -> f64 {
    match (target, source) {
        (Unit::Dollars, s) if s != Unit::Dollars => delta * 1000.0,
        (Unit::Percent, Unit::Dollars) => delta / 1000.0,
        (Unit::Multiplier, s) if s != Unit::Multiplier => delta / 100.0,
        _ => delta,
    }
}

// ---------------------------------------------------------------------------
// Spec types (serde-facing)
// ---------------------------------------------------------------------------

/// One node definition as written in a graph file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub unit: Unit,
    /// Starting value; also the reference against which deviations are
    /// measured.
    pub base: f64,
    /// Delta applied to the node's own value per investment.
    pub invest_effect: f64,
    /// Whether the value is floored at half its base.
    #[serde(default)]
    pub has_floor: bool,
}

/// One directed edge definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    /// Fraction of the source deviation delivered to the target.
    pub weight: f64,
    /// Quarters between emission and delivery. Must be at least 1.
    pub lag: u32,
}

/// A complete graph definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    /// Node whose value drives quarterly revenue, if any.
    #[serde(default)]
    pub revenue_node: Option<String>,
    /// Node whose value is treated as outstanding capex for payback math.
    #[serde(default)]
    pub capex_node: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated graph
// ---------------------------------------------------------------------------

/// A validated node. `floor`, when present, is half the base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,
    pub label: String,
    pub unit: Unit,
    pub base: f64,
    pub invest_effect: f64,
    pub floor: Option<f64>,
}

impl NodeDef {
    /// Clamp a candidate value to the node's floor, if it has one.
    pub fn clamp(&self, value: f64) -> f64 {
        match self.floor {
            Some(floor) => value.max(floor),
            None => value,
        }
    }
}

/// A validated edge, endpoints resolved to keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDef {
    pub from: NodeKey,
    pub to: NodeKey,
    pub weight: f64,
    pub lag: u32,
}

/// A validated, key-indexed graph. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlywheelGraph {
    nodes: SlotMap<NodeKey, NodeDef>,
    /// Keys in definition order, for deterministic iteration.
    order: Vec<NodeKey>,
    by_id: HashMap<String, NodeKey>,
    edges: Vec<EdgeDef>,
    revenue_node: Option<NodeKey>,
    capex_node: Option<NodeKey>,
}

impl FlywheelGraph {
    /// Validate a spec and build the runnable graph.
    ///
    /// Rejects empty graphs, duplicate node ids, edges with unknown
    /// endpoints or zero lag, and role nodes that do not exist.
    pub fn build(spec: GraphSpec) -> Result<Self, FlywheelError> {
        if spec.nodes.is_empty() {
            return Err(FlywheelError::EmptyGraph);
        }

        let mut nodes = SlotMap::with_key();
        let mut order = Vec::with_capacity(spec.nodes.len());
        let mut by_id = HashMap::with_capacity(spec.nodes.len());

        for node in spec.nodes {
            if by_id.contains_key(&node.id) {
                return Err(FlywheelError::DuplicateNode(node.id));
            }
            let floor = node.has_floor.then_some(node.base * 0.5);
            let id = node.id.clone();
            let key = nodes.insert(NodeDef {
                id: node.id,
                label: node.label,
                unit: node.unit,
                base: node.base,
                invest_effect: node.invest_effect,
                floor,
            });
            order.push(key);
            by_id.insert(id, key);
        }

        let mut edges = Vec::with_capacity(spec.edges.len());
        for edge in spec.edges {
            let from = *by_id
                .get(&edge.from)
                .ok_or_else(|| FlywheelError::UnknownEdgeEndpoint(edge.from.clone()))?;
            let to = *by_id
                .get(&edge.to)
                .ok_or_else(|| FlywheelError::UnknownEdgeEndpoint(edge.to.clone()))?;
            if edge.lag == 0 {
                return Err(FlywheelError::ZeroLag {
                    from: edge.from,
                    to: edge.to,
                });
            }
            edges.push(EdgeDef {
                from,
                to,
                weight: edge.weight,
                lag: edge.lag,
            });
        }

        let resolve_role = |id: &Option<String>| -> Result<Option<NodeKey>, FlywheelError> {
            match id {
                Some(id) => by_id
                    .get(id)
                    .copied()
                    .map(Some)
                    .ok_or_else(|| FlywheelError::UnknownRoleNode(id.clone())),
                None => Ok(None),
            }
        };
        let revenue_node = resolve_role(&spec.revenue_node)?;
        let capex_node = resolve_role(&spec.capex_node)?;

        Ok(Self {
            nodes,
            order,
            by_id,
            edges,
            revenue_node,
            capex_node,
        })
    }

    /// Look up a node by its string id.
    pub fn lookup(&self, id: &str) -> Option<NodeKey> {
        self.by_id.get(id).copied()
    }

    pub fn node(&self, key: NodeKey) -> &NodeDef {
        &self.nodes[key]
    }

    /// Keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.order.iter().copied()
    }

    pub fn edges(&self) -> &[EdgeDef] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Node whose value drives quarterly revenue.
    pub fn revenue_node(&self) -> Option<NodeKey> {
        self.revenue_node
    }

    /// Node treated as outstanding capex.
    pub fn capex_node(&self) -> Option<NodeKey> {
        self.capex_node
    }
}

// ---------------------------------------------------------------------------
// Default graph
// ---------------------------------------------------------------------------

/// The five-node robotics-economics flywheel the toolkit ships with.
pub fn default_spec() -> GraphSpec {
    let node = |id: &str, label: &str, unit, base, invest_effect, has_floor| NodeSpec {
        id: id.into(),
        label: label.into(),
        unit,
        base,
        invest_effect,
        has_floor,
    };
    let edge = |from: &str, to: &str, weight, lag| EdgeSpec {
        from: from.into(),
        to: to.into(),
        weight,
        lag,
    };

    GraphSpec {
        nodes: vec![
            node("capex", "Lower CapEx", Unit::Dollars, 45_000.0, -500.0, true),
            node(
                "financing",
                "Better Financing",
                Unit::Percent,
                12.0,
                -0.3,
                true,
            ),
            node(
                "deployments",
                "More Deployments",
                Unit::Count,
                50.0,
                3.0,
                false,
            ),
            node(
                "scale",
                "Manufacturing Scale",
                Unit::Multiplier,
                1.0,
                0.05,
                false,
            ),
            node(
                "supply",
                "Robust Supply Chain",
                Unit::Percent,
                60.0,
                2.0,
                false,
            ),
        ],
        edges: vec![
            edge("capex", "financing", 0.7, 1),
            edge("capex", "scale", 0.3, 2),
            edge("financing", "deployments", 0.8, 1),
            edge("deployments", "scale", 0.6, 1),
            edge("scale", "capex", 0.5, 2),
            edge("scale", "supply", 0.4, 1),
            edge("supply", "capex", 0.3, 1),
            edge("supply", "financing", 0.2, 1),
        ],
        revenue_node: Some("deployments".into()),
        capex_node: Some("capex".into()),
    }
}

/// Build the default graph. Infallible by construction.
pub fn default_graph() -> FlywheelGraph {
    // The default spec is validated by tests; build cannot fail on it.
    match FlywheelGraph::build(default_spec()) {
        Ok(graph) => graph,
        Err(_) => unreachable!("default graph spec is valid"),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
