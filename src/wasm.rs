//! WASM bindings.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmAnalysis } from 'compact_mna';
//!
//! await init();
//!
//! const analysis = new WasmAnalysis(`
//! V1 in 0 1
//! R1 in minus 1k
//! R2 minus out 10k
//! O1 out 0 0 minus
//! `);
//!
//! analysis.node_voltage("out");   // -10
//! analysis.branch_current("V1");  // -1e-3
//! console.log(analysis.report());
//! ```

use wasm_bindgen::prelude::*;

use crate::solver::{Analysis, AnalysisConfig, Solution};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A solved circuit, exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmAnalysis {
    solution: Solution,
}

#[wasm_bindgen]
impl WasmAnalysis {
    /// Parse and solve a netlist (no title line).
    ///
    /// Throws with the error message if the netlist is malformed, the
    /// circuit is invalid or the system is singular.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str) -> Result<WasmAnalysis, JsValue> {
        Self::with_tolerance(netlist, crate::solver::DEFAULT_PIVOT_TOLERANCE)
    }

    /// Parse and solve with a custom pivot tolerance.
    #[wasm_bindgen]
    pub fn with_tolerance(netlist: &str, tolerance: f64) -> Result<WasmAnalysis, JsValue> {
        let config = AnalysisConfig::new().with_pivot_tolerance(tolerance);
        let solution = Analysis::from_netlist(netlist, config)
            .and_then(|analysis| analysis.run())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmAnalysis { solution })
    }

    /// Voltage at a named node, or `undefined` if unknown or not computed.
    #[wasm_bindgen]
    pub fn node_voltage(&self, node_name: &str) -> Option<f64> {
        self.solution.node_voltage(node_name)
    }

    /// Branch current of a named element, or `undefined`.
    #[wasm_bindgen]
    pub fn branch_current(&self, element_name: &str) -> Option<f64> {
        self.solution.branch_current(element_name)
    }

    /// Number of equations in the reduced system.
    #[wasm_bindgen(getter)]
    pub fn num_equations(&self) -> usize {
        self.solution.num_equations
    }

    /// The full solution listing.
    #[wasm_bindgen]
    pub fn report(&self) -> String {
        self.solution.to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
