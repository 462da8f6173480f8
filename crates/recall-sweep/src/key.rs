//! Sweep cell key: one (activation, item count) configuration.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Identifies one (f, L) configuration of a sweep.
///
/// Ordered by activation first, then by item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigKey {
    /// Activation probability (f).
    pub activation: OrderedFloat<f64>,
    /// Number of items (L).
    pub items: usize,
}

impl ConfigKey {
    /// Create a key.
    pub fn new(activation: f64, items: usize) -> Self {
        Self {
            activation: OrderedFloat(activation),
            items,
        }
    }

    /// Activation probability as a plain float.
    pub fn activation(&self) -> f64 {
        self.activation.into_inner()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f={} L={}", self.activation, self.items)
    }
}
