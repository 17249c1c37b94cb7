//! Circuit representation and validation.
//!
//! This module provides the in-memory netlist model built from parsed
//! lines. The [`Circuit`] struct holds the node name table and the element
//! list; both are frozen before reduction begins.

mod graph;
mod symbols;
mod types;
mod validate;

pub use graph::Circuit;
pub use symbols::{SymbolTable, REFERENCE_NODE};
pub use types::*;
pub use validate::validate_circuit;
