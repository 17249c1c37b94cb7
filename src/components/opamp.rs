//! Ideal operational amplifier.
//!
//! The ideal op-amp is a nullor: its input draws no current and carries no
//! voltage (`V(c) = V(d)`), while its output between `a` and `b` supplies
//! whatever current the circuit needs. It has no stamp. The reduction
//! engine sums the KCL rows of `a` and `b`, cancelling the unknown output
//! current, and identifies the voltage columns of `c` and `d`. Each op-amp
//! therefore removes one equation from the system.

use crate::circuit::{ElementId, VarId};

/// An ideal operational amplifier.
#[derive(Debug, Clone)]
pub struct OpAmp {
    pub id: ElementId,
    pub name: String,
    pub nodes: [VarId; 4], // [out a, out b, in c, in d]
    pub line: usize,
}

impl OpAmp {
    /// Create a new op-amp.
    pub fn new(id: ElementId, name: String, nodes: [VarId; 4], line: usize) -> Self {
        Self { id, name, nodes, line }
    }

    /// Output terminals `(a, b)`.
    pub fn output(&self) -> (VarId, VarId) {
        (self.nodes[0], self.nodes[1])
    }

    /// Input terminals `(c, d)`.
    pub fn input(&self) -> (VarId, VarId) {
        (self.nodes[2], self.nodes[3])
    }
}
