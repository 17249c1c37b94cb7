//! Error types for the compact MNA engine.
//!
//! This module provides a unified error type [`MnaError`] covering every
//! condition that can abort an analysis run: netlist reading, capacity
//! limits, element values, contradictory topologies and singular systems.
//! All of them are fatal for the run in progress.

use thiserror::Error;

/// Result type alias using [`MnaError`].
pub type Result<T> = std::result::Result<T, MnaError>;

/// What kind of storage limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Distinct node names
    Nodes,
    /// Netlist elements
    Elements,
    /// Nodes plus auxiliary branch-current variables
    Variables,
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capacity::Nodes => write!(f, "nodes"),
            Capacity::Elements => write!(f, "elements"),
            Capacity::Variables => write!(f, "variables"),
        }
    }
}

/// Unified error type for all analysis operations.
#[derive(Error, Debug)]
pub enum MnaError {
    // ============ Netlist Errors ============
    /// Malformed netlist line
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Leading type letter is not one of R, I, V, G, E, F, H, O
    #[error("Unknown element type '{element_type}' at line {line}")]
    UnknownElementType { element_type: String, line: usize },

    /// Too many nodes, elements or variables
    #[error("Capacity exceeded at element '{element}' (line {line}): at most {limit} {what} are accepted")]
    CapacityExceeded {
        what: Capacity,
        limit: usize,
        element: String,
        line: usize,
    },

    /// Element value that cannot be stamped
    #[error("Invalid value for element '{element}' at line {line}: {message}")]
    InvalidValue {
        element: String,
        line: usize,
        message: String,
    },

    // ============ Reduction Errors ============
    /// Contradictory row or column merge (e.g. a shorted voltage source)
    #[error("Invalid circuit at element '{element}' (line {line}): {message}")]
    InvalidCircuit {
        element: String,
        line: usize,
        message: String,
    },

    // ============ Solver Errors ============
    /// No pivot above tolerance could be found
    #[error("Singular system at equation {equation} (variable {variable})")]
    SingularSystem { equation: usize, variable: String },

    // ============ I/O Errors ============
    /// Error reading the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl MnaError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(element: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            element: element.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid circuit error
    pub fn invalid_circuit(element: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidCircuit {
            element: element.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a capacity error raised while adding `element`
    pub fn capacity(what: Capacity, limit: usize, element: impl Into<String>, line: usize) -> Self {
        Self::CapacityExceeded {
            what,
            limit,
            element: element.into(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = MnaError::invalid_circuit("V2", 4, "rows of nodes 1 and 0 are already merged");
        let text = err.to_string();
        assert!(text.contains("V2"));
        assert!(text.contains("line 4"));

        let err = MnaError::capacity(Capacity::Elements, 50, "R51", 52);
        assert_eq!(
            err.to_string(),
            "Capacity exceeded at element 'R51' (line 52): at most 50 elements are accepted"
        );
    }
}
