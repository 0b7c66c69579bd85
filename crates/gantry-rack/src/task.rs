//! The shared cabling task: three patch cables, one 24-port switch.
//!
//! Both workers face the same job. Each cable has a single correct port;
//! a plug into any other port still counts as plugged, just wrong.

use serde::{Deserialize, Serialize};

/// Ports on the patch panel, numbered `1..=PORT_COUNT`.
pub const PORT_COUNT: u8 = 24;

/// One cable in the task, with its designated port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableSpec {
    /// Stable index into [`CABLES`].
    pub id: usize,
    pub label: &'static str,
    pub target_port: u8,
}

/// The task's cables, in the order both workers handle them.
pub const CABLES: [CableSpec; 3] = [
    CableSpec {
        id: 0,
        label: "Red",
        target_port: 5,
    },
    CableSpec {
        id: 1,
        label: "Blue",
        target_port: 12,
    },
    CableSpec {
        id: 2,
        label: "Green",
        target_port: 18,
    },
];

/// A cable that has been seated in a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluggedCable {
    pub cable_id: usize,
    pub port: u8,
    pub correct: bool,
}

impl PluggedCable {
    /// Record a plug, judging it against the cable's target port.
    pub fn record(cable: CableSpec, port: u8) -> Self {
        Self {
            cable_id: cable.id,
            port,
            correct: port == cable.target_port,
        }
    }
}

/// True when a port number is on the panel.
pub fn valid_port(port: u8) -> bool {
    (1..=PORT_COUNT).contains(&port)
}

// ===========================================================================
// Tests
// ===========================================================================
