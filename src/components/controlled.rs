//! Linear controlled sources (G, E, F, H).

use crate::circuit::{ElementId, VarId};

/// A four-terminal controlled source.
///
/// The output acts between `a` and `b`; the control is the voltage
/// `V(c) - V(d)` (G, E) or the current through a short circuit from `c` to
/// `d` (F, H). Which relation applies is given by the [`Element`] variant
/// holding it.
///
/// [`Element`]: super::Element
#[derive(Debug, Clone)]
pub struct ControlledSource {
    pub id: ElementId,
    pub name: String,
    pub nodes: [VarId; 4], // [a, b, c, d]
    /// Transconductance, voltage gain, current gain or transresistance
    pub gain: f64,
    pub line: usize,
}

impl ControlledSource {
    /// Create a new controlled source.
    pub fn new(id: ElementId, name: String, nodes: [VarId; 4], gain: f64, line: usize) -> Self {
        Self {
            id,
            name,
            nodes,
            gain,
            line,
        }
    }

    /// Output terminals `(a, b)`.
    pub fn output(&self) -> (VarId, VarId) {
        (self.nodes[0], self.nodes[1])
    }

    /// Controlling terminals `(c, d)`.
    pub fn control(&self) -> (VarId, VarId) {
        (self.nodes[2], self.nodes[3])
    }
}
