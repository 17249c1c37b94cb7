//! In-memory netlist model.

use super::symbols::SymbolTable;
use super::types::{ElementId, VarId};
use crate::components::Element;
use crate::error::{Capacity, MnaError, Result};
use crate::netlist::{NetlistAst, NetlistLine};

/// A circuit ready for analysis: the node table plus the element list.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Circuit title, if the netlist had one
    pub title: Option<String>,

    /// All elements, in netlist order
    pub elements: Vec<Element>,

    /// Node name table
    pub symbols: SymbolTable,

    /// Maximum number of elements accepted
    max_elements: usize,
}

impl Circuit {
    /// Create an empty circuit with the given capacity limits.
    pub fn new(max_nodes: usize, max_elements: usize) -> Self {
        Self {
            title: None,
            elements: Vec::new(),
            symbols: SymbolTable::new(max_nodes),
            max_elements,
        }
    }

    /// Build a circuit from a parsed netlist.
    pub fn from_ast(ast: &NetlistAst, max_nodes: usize, max_elements: usize) -> Result<Self> {
        let mut circuit = Self::new(max_nodes, max_elements);
        circuit.title = ast.title.clone();
        for line in &ast.lines {
            circuit.add_line(line)?;
        }
        Ok(circuit)
    }

    /// Append one parsed line. Comment lines are skipped and return `None`.
    pub fn add_line(&mut self, line: &NetlistLine) -> Result<Option<ElementId>> {
        let def = match line {
            NetlistLine::Comment { text, line } => {
                log::debug!("line {}: comment: {}", line, text);
                return Ok(None);
            }
            NetlistLine::Element(def) => def,
        };

        if self.elements.len() == self.max_elements {
            return Err(MnaError::capacity(
                Capacity::Elements,
                self.max_elements,
                &def.name,
                def.line,
            ));
        }

        let nodes = def
            .nodes
            .iter()
            .map(|name| {
                self.symbols.index_of(name).ok_or_else(|| {
                    MnaError::capacity(Capacity::Nodes, self.symbols.max_nodes(), &def.name, def.line)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let id = ElementId(self.elements.len());
        let element = Element::from_def(id, def, &nodes)?;
        log::debug!("line {}: {}", def.line, element);
        self.elements.push(element);
        Ok(Some(id))
    }

    /// Number of non-reference nodes.
    pub fn num_nodes(&self) -> usize {
        self.symbols.node_count()
    }

    /// Find a node index by name.
    pub fn find_node(&self, name: &str) -> Option<VarId> {
        self.symbols.lookup(name)
    }

    /// Find an element by name.
    pub fn find_element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;

    #[test]
    fn test_from_ast_assigns_nodes_in_order() {
        let ast = netlist::parse("* test\nV1 in 0 10\nR1 in out 1k\nR2 out 0 1k\n").unwrap();
        let circuit = Circuit::from_ast(&ast, 50, 50).unwrap();
        assert_eq!(circuit.elements.len(), 3);
        assert_eq!(circuit.num_nodes(), 2);
        assert_eq!(circuit.find_node("in"), Some(VarId(1)));
        assert_eq!(circuit.find_node("out"), Some(VarId(2)));
        assert_eq!(circuit.elements[1].terminals(), &[VarId(1), VarId(2)]);
        assert_eq!(circuit.find_element("R2").map(|e| e.id()), Some(ElementId(2)));
    }

    #[test]
    fn test_element_capacity() {
        let ast = netlist::parse("R1 1 0 1\nR2 1 0 1\nR3 1 0 1\n").unwrap();
        let err = Circuit::from_ast(&ast, 50, 2).unwrap_err();
        match err {
            MnaError::CapacityExceeded {
                what: Capacity::Elements,
                limit: 2,
                element,
                line,
            } => {
                assert_eq!(element, "R3");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_node_capacity_names_element() {
        let ast = netlist::parse("* two nodes only\nR1 1 2 1\nR2 2 0 1\nR3 2 3 1\n").unwrap();
        let err = Circuit::from_ast(&ast, 2, 50).unwrap_err();
        match err {
            MnaError::CapacityExceeded {
                what: Capacity::Nodes,
                limit: 2,
                element,
                line,
            } => {
                assert_eq!(element, "R3");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_comments_do_not_use_element_slots() {
        let ast = netlist::parse("* one\n* two\nR1 1 0 1\n").unwrap();
        let circuit = Circuit::from_ast(&ast, 50, 1).unwrap();
        assert_eq!(circuit.elements.len(), 1);
    }
}
