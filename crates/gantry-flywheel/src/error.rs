//! Error types for graph construction and engine operations.

use thiserror::Error;

/// Errors surfaced by graph validation and engine calls.
#[derive(Debug, Error)]
pub enum FlywheelError {
    /// An operation named a node the graph does not contain.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    /// Two node definitions share an id.
    #[error("duplicate node '{0}'")]
    DuplicateNode(String),

    /// An edge endpoint names a node the graph does not contain.
    #[error("edge references unknown node '{0}'")]
    UnknownEdgeEndpoint(String),

    /// Edges must take at least one quarter to deliver their effect.
    #[error("edge {from} -> {to} must have a lag of at least one quarter")]
    ZeroLag { from: String, to: String },

    /// A designated role (revenue driver, capex) names a missing node.
    #[error("role node '{0}' is not defined in the graph")]
    UnknownRoleNode(String),

    /// A graph with no nodes cannot simulate anything.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The JSON graph definition failed to parse.
    #[cfg(feature = "data-loader")]
    #[error("failed to parse graph definition: {0}")]
    Parse(#[from] serde_json::Error),
}
