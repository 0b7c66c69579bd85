//! JSON graph loading (feature `data-loader`).
//!
//! Lets hosts ship alternative economies as data instead of recompiling.
//! Definitions are validated on load; a graph that parses but fails
//! validation is rejected with the same errors as a programmatic build.

use crate::error::FlywheelError;
use crate::graph::{FlywheelGraph, GraphSpec};

/// Parse and validate a graph definition from JSON.
pub fn graph_from_json(json: &str) -> Result<FlywheelGraph, FlywheelError> {
    let spec: GraphSpec = serde_json::from_str(json)?;
    FlywheelGraph::build(spec)
}

// ===========================================================================
// Tests
// ===========================================================================
