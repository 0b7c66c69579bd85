//! Bounded per-node value history.
//!
//! Each node keeps the last few quarterly samples for sparkline rendering.
//! Old samples fall off the front; the window never grows.

use serde::{Deserialize, Serialize};

/// Samples retained per node.
pub const HISTORY_LEN: usize = 8;

/// A bounded window of quarterly samples, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    samples: Vec<f64>,
}

impl History {
    /// Start a history with the node's base value as the first sample.
    pub fn seeded(initial: f64) -> Self {
        let mut samples = Vec::with_capacity(HISTORY_LEN);
        samples.push(initial);
        Self { samples }
    }

    /// Append a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == HISTORY_LEN {
            self.samples.remove(0);
        }
        self.samples.push(value);
    }

    /// Samples oldest to newest.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Most recent sample.
    pub fn last(&self) -> f64 {
        // seeded() guarantees at least one sample
        self.samples[self.samples.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test 1: seeded history starts with one sample
    // -----------------------------------------------------------------------
    #[test]
    fn seeded_starts_with_one_sample() {
        let history = History::seeded(45_000.0);
        assert_eq!(history.samples(), &[45_000.0]);
        assert_eq!(history.last(), 45_000.0);
    }

    // -----------------------------------------------------------------------
    // Test 2: window caps at HISTORY_LEN, oldest evicted
    // -----------------------------------------------------------------------
    #[test]
    fn window_caps_and_evicts_oldest() {
        let mut history = History::seeded(0.0);
        for i in 1..=10 {
            history.push(i as f64);
        }
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(
            history.samples(),
            &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(history.last(), 10.0);
    }
}
