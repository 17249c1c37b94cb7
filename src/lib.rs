//! # Compact MNA
//!
//! DC analysis of linear circuits by compact modified nodal analysis.
//!
//! This library provides:
//! - A reader for SPICE-like netlists (R, I, V, G, E, F, H and ideal op-amps)
//! - Row/column merge reduction that keeps the system no larger than the
//!   number of nodes
//! - A Gauss-Jordan solver with pivot search
//! - Recovery of the branch currents the reduced system leaves out
//!
//! ## Architecture
//!
//! - [`netlist`] - Netlist lexer and parser
//! - [`circuit`] - Node table, element list and validation
//! - [`components`] - Element models
//! - [`solver`] - Reduction, stamping and solving
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! cmna divider.net -v
//! ```
//!
//! ### Library
//!
//! ```
//! let solution = compact_mna::analyze("V1 1 0 10\nR1 1 2 1k\nR2 2 0 1k\n").unwrap();
//! assert_eq!(solution.num_equations, 2);
//! assert!((solution.node_voltage("2").unwrap() - 5.0).abs() < 1e-9);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmAnalysis } from 'compact_mna';
//!
//! const analysis = new WasmAnalysis(netlist);
//! console.log(analysis.node_voltage("out"));
//! ```

pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{MnaError, Result};
pub use solver::{Analysis, AnalysisConfig, Solution};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmAnalysis;

/// Analyse netlist text (no title line) with the default configuration.
pub fn analyze(netlist: &str) -> Result<Solution> {
    Analysis::from_netlist(netlist, AnalysisConfig::default())?.run()
}
