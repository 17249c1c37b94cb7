//! Independent voltage and current sources.

use crate::circuit::{ElementId, VarId};

/// An independent voltage source.
///
/// Enforces `V(a) - V(b) = voltage`. Its branch current becomes an
/// auxiliary variable whose column is merged into ground, while the KCL
/// rows of `a` and `b` are summed into one.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    pub id: ElementId,
    pub name: String,
    pub nodes: [VarId; 2], // [a (+), b (-)]
    pub voltage: f64,
    pub line: usize,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(id: ElementId, name: String, nodes: [VarId; 2], voltage: f64, line: usize) -> Self {
        Self {
            id,
            name,
            nodes,
            voltage,
            line,
        }
    }
}

/// An independent current source.
///
/// The current flows out of node `a`, through the source, into node `b`.
/// It contributes to the right-hand side only.
#[derive(Debug, Clone)]
pub struct CurrentSource {
    pub id: ElementId,
    pub name: String,
    pub nodes: [VarId; 2], // [a, b] - current flows from a to b
    pub current: f64,
    pub line: usize,
}

impl CurrentSource {
    /// Create a new current source.
    pub fn new(id: ElementId, name: String, nodes: [VarId; 2], current: f64, line: usize) -> Self {
        Self {
            id,
            name,
            nodes,
            current,
            line,
        }
    }
}
