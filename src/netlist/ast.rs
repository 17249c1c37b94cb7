//! Parsed netlist records.

use std::fmt;

/// Complete parsed netlist, in source order.
#[derive(Debug, Clone, Default)]
pub struct NetlistAst {
    /// Title line, when the netlist was read with one
    pub title: Option<String>,
    /// Element and comment lines
    pub lines: Vec<NetlistLine>,
}

impl NetlistAst {
    /// Create a new empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over the element lines only.
    pub fn elements(&self) -> impl Iterator<Item = &ElementDef> {
        self.lines.iter().filter_map(|line| match line {
            NetlistLine::Element(def) => Some(def),
            NetlistLine::Comment { .. } => None,
        })
    }
}

/// One meaningful netlist line.
#[derive(Debug, Clone, PartialEq)]
pub enum NetlistLine {
    /// `*` comment line; creates no element
    Comment { text: String, line: usize },
    /// An element line
    Element(ElementDef),
}

/// An element definition as written in the netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    /// Element type, from the leading letter of the name
    pub kind: ElementKind,
    /// Element name, including its type letter
    pub name: String,
    /// Terminal node names: `a, b` then `c, d` for four-terminal elements
    pub nodes: Vec<String>,
    /// Element value; `None` only for op-amps
    pub value: Option<f64>,
    /// Source line number for error reporting
    pub line: usize,
}

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `R`: resistor
    Resistor,
    /// `I`: independent current source
    CurrentSource,
    /// `V`: independent voltage source
    VoltageSource,
    /// `G`: voltage-controlled current source
    Vccs,
    /// `E`: voltage-controlled voltage source
    Vcvs,
    /// `F`: current-controlled current source
    Cccs,
    /// `H`: current-controlled voltage source
    Ccvs,
    /// `O`: ideal operational amplifier (nullor)
    OpAmp,
}

impl ElementKind {
    /// Parse an element type from the first letter of its name.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'I' => Some(Self::CurrentSource),
            'V' => Some(Self::VoltageSource),
            'G' => Some(Self::Vccs),
            'E' => Some(Self::Vcvs),
            'F' => Some(Self::Cccs),
            'H' => Some(Self::Ccvs),
            'O' => Some(Self::OpAmp),
            _ => None,
        }
    }

    /// The netlist letter for this type.
    pub fn letter(&self) -> char {
        match self {
            Self::Resistor => 'R',
            Self::CurrentSource => 'I',
            Self::VoltageSource => 'V',
            Self::Vccs => 'G',
            Self::Vcvs => 'E',
            Self::Cccs => 'F',
            Self::Ccvs => 'H',
            Self::OpAmp => 'O',
        }
    }

    /// Get the expected number of nodes for this element type.
    pub fn expected_node_count(&self) -> usize {
        match self {
            Self::Resistor | Self::CurrentSource | Self::VoltageSource => 2,
            Self::Vccs | Self::Vcvs | Self::Cccs | Self::Ccvs | Self::OpAmp => 4,
        }
    }

    /// Whether a numeric value follows the nodes.
    pub fn has_value(&self) -> bool {
        !matches!(self, Self::OpAmp)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resistor => "resistor",
            Self::CurrentSource => "current source",
            Self::VoltageSource => "voltage source",
            Self::Vccs => "voltage-controlled current source",
            Self::Vcvs => "voltage-controlled voltage source",
            Self::Cccs => "current-controlled current source",
            Self::Ccvs => "current-controlled voltage source",
            Self::OpAmp => "operational amplifier",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_round_trip() {
        for letter in ['R', 'I', 'V', 'G', 'E', 'F', 'H', 'O'] {
            let kind = ElementKind::from_prefix(letter).unwrap();
            assert_eq!(kind.letter(), letter);
        }
        assert_eq!(ElementKind::from_prefix('h'), Some(ElementKind::Ccvs));
        assert_eq!(ElementKind::from_prefix('C'), None);
        assert_eq!(ElementKind::from_prefix('*'), None);
    }
}
