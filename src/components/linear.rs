//! Linear passive elements.

use crate::circuit::{ElementId, VarId};

/// A resistor between nodes `a` and `b`.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub id: ElementId,
    pub name: String,
    pub nodes: [VarId; 2], // [a, b]
    pub resistance: f64,
    pub line: usize,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(id: ElementId, name: String, nodes: [VarId; 2], resistance: f64, line: usize) -> Self {
        Self {
            id,
            name,
            nodes,
            resistance,
            line,
        }
    }

    /// Get the conductance (1/R).
    ///
    /// Zero resistance is rejected during circuit validation, before any
    /// stamping happens.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Current flowing from `a` to `b` for the given terminal voltages.
    pub fn current(&self, v_a: f64, v_b: f64) -> f64 {
        (v_a - v_b) * self.conductance()
    }
}
