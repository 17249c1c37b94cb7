//! Element models.
//!
//! This module provides the closed set of netlist elements:
//! - Linear: Resistor
//! - Sources: Voltage Source, Current Source
//! - Controlled sources: G (VCCS), E (VCVS), F (CCCS), H (CCVS)
//! - Ideal op-amp (nullor)
//!
//! Elements are plain data, immutable once read. How each one reduces the
//! system and stamps the matrix lives in [`crate::solver`].

mod controlled;
mod linear;
mod opamp;
mod sources;

pub use controlled::ControlledSource;
pub use linear::Resistor;
pub use opamp::OpAmp;
pub use sources::{CurrentSource, VoltageSource};

use std::fmt;

use crate::circuit::{ElementId, VarId};
use crate::error::{MnaError, Result};
use crate::netlist::{ElementDef, ElementKind};

/// A netlist element.
#[derive(Debug, Clone)]
pub enum Element {
    Resistor(Resistor),
    CurrentSource(CurrentSource),
    VoltageSource(VoltageSource),
    /// `G`: output current `gain * (V(c) - V(d))` from `a` to `b`
    Vccs(ControlledSource),
    /// `E`: output voltage `V(a) - V(b) = gain * (V(c) - V(d))`
    Vcvs(ControlledSource),
    /// `F`: output current `gain * I(c->d)` from `a` to `b`
    Cccs(ControlledSource),
    /// `H`: output voltage `V(a) - V(b) = gain * I(c->d)`
    Ccvs(ControlledSource),
    OpAmp(OpAmp),
}

impl Element {
    /// Create an element from a parsed definition whose node names have
    /// already been resolved to indices.
    pub fn from_def(id: ElementId, def: &ElementDef, nodes: &[VarId]) -> Result<Self> {
        if nodes.len() < def.kind.expected_node_count() {
            return Err(MnaError::parse(
                def.line,
                format!("{} '{}' is missing terminals", def.kind, def.name),
            ));
        }
        let value = || {
            def.value.ok_or_else(|| {
                MnaError::invalid_value(&def.name, def.line, format!("{} requires a value", def.kind))
            })
        };
        let two = [nodes[0], nodes[1]];
        let four = || [nodes[0], nodes[1], nodes[2], nodes[3]];
        let name = def.name.clone();

        Ok(match def.kind {
            ElementKind::Resistor => Element::Resistor(Resistor::new(id, name, two, value()?, def.line)),
            ElementKind::CurrentSource => {
                Element::CurrentSource(CurrentSource::new(id, name, two, value()?, def.line))
            }
            ElementKind::VoltageSource => {
                Element::VoltageSource(VoltageSource::new(id, name, two, value()?, def.line))
            }
            ElementKind::Vccs => Element::Vccs(ControlledSource::new(id, name, four(), value()?, def.line)),
            ElementKind::Vcvs => Element::Vcvs(ControlledSource::new(id, name, four(), value()?, def.line)),
            ElementKind::Cccs => Element::Cccs(ControlledSource::new(id, name, four(), value()?, def.line)),
            ElementKind::Ccvs => Element::Ccvs(ControlledSource::new(id, name, four(), value()?, def.line)),
            ElementKind::OpAmp => Element::OpAmp(OpAmp::new(id, name, four(), def.line)),
        })
    }

    /// Get the element type.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Resistor(_) => ElementKind::Resistor,
            Element::CurrentSource(_) => ElementKind::CurrentSource,
            Element::VoltageSource(_) => ElementKind::VoltageSource,
            Element::Vccs(_) => ElementKind::Vccs,
            Element::Vcvs(_) => ElementKind::Vcvs,
            Element::Cccs(_) => ElementKind::Cccs,
            Element::Ccvs(_) => ElementKind::Ccvs,
            Element::OpAmp(_) => ElementKind::OpAmp,
        }
    }

    /// Get the element ID.
    pub fn id(&self) -> ElementId {
        match self {
            Element::Resistor(r) => r.id,
            Element::CurrentSource(i) => i.id,
            Element::VoltageSource(v) => v.id,
            Element::Vccs(s) | Element::Vcvs(s) | Element::Cccs(s) | Element::Ccvs(s) => s.id,
            Element::OpAmp(o) => o.id,
        }
    }

    /// Get the element name.
    pub fn name(&self) -> &str {
        match self {
            Element::Resistor(r) => &r.name,
            Element::CurrentSource(i) => &i.name,
            Element::VoltageSource(v) => &v.name,
            Element::Vccs(s) | Element::Vcvs(s) | Element::Cccs(s) | Element::Ccvs(s) => &s.name,
            Element::OpAmp(o) => &o.name,
        }
    }

    /// Source line the element was read from.
    pub fn line(&self) -> usize {
        match self {
            Element::Resistor(r) => r.line,
            Element::CurrentSource(i) => i.line,
            Element::VoltageSource(v) => v.line,
            Element::Vccs(s) | Element::Vcvs(s) | Element::Cccs(s) | Element::Ccvs(s) => s.line,
            Element::OpAmp(o) => o.line,
        }
    }

    /// Terminal indices: `[a, b]` or `[a, b, c, d]`.
    pub fn terminals(&self) -> &[VarId] {
        match self {
            Element::Resistor(r) => &r.nodes,
            Element::CurrentSource(i) => &i.nodes,
            Element::VoltageSource(v) => &v.nodes,
            Element::Vccs(s) | Element::Vcvs(s) | Element::Cccs(s) | Element::Ccvs(s) => &s.nodes,
            Element::OpAmp(o) => &o.nodes,
        }
    }

    /// Element value; `None` for op-amps.
    pub fn value(&self) -> Option<f64> {
        match self {
            Element::Resistor(r) => Some(r.resistance),
            Element::CurrentSource(i) => Some(i.current),
            Element::VoltageSource(v) => Some(v.voltage),
            Element::Vccs(s) | Element::Vcvs(s) | Element::Cccs(s) | Element::Ccvs(s) => Some(s.gain),
            Element::OpAmp(_) => None,
        }
    }
}

/// Internal netlist form: name, terminal indices, value.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for node in self.terminals() {
            write!(f, " {}", node.0)?;
        }
        if let Some(value) = self.value() {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}
