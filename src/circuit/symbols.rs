//! Node name table.

use std::collections::HashMap;

use super::types::VarId;

/// Name of the reference node.
pub const REFERENCE_NODE: &str = "0";

/// Assigns a stable index to every distinct node name.
///
/// The reference node `"0"` is registered at construction and always maps
/// to [`VarId::GROUND`]. Other names get `1, 2, ...` in order of first
/// mention.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    index: HashMap<String, VarId>,
    names: Vec<String>,
    max_nodes: usize,
}

impl SymbolTable {
    /// Create a table accepting at most `max_nodes` non-reference nodes.
    pub fn new(max_nodes: usize) -> Self {
        let mut index = HashMap::new();
        index.insert(REFERENCE_NODE.to_string(), VarId::GROUND);
        Self {
            index,
            names: vec![REFERENCE_NODE.to_string()],
            max_nodes,
        }
    }

    /// Index of `name`, allocating the next one on first mention.
    ///
    /// Returns `None` when `name` is new and the table is full.
    pub fn index_of(&mut self, name: &str) -> Option<VarId> {
        if let Some(&id) = self.index.get(name) {
            return Some(id);
        }
        if self.node_count() == self.max_nodes {
            return None;
        }
        let id = VarId(self.names.len());
        self.index.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Some(id)
    }

    /// Maximum number of non-reference nodes.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Index of an already known name.
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.index.get(name).copied()
    }

    /// Name of a node index.
    pub fn name(&self, id: VarId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Number of non-reference nodes.
    pub fn node_count(&self) -> usize {
        self.names.len() - 1
    }

    /// All names, indexed by node number (entry 0 is the reference).
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
