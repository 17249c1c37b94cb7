//! Analysis session: one circuit, one configuration, one solve.

use std::fmt;

use crate::circuit::{validate_circuit, Circuit, ElementId, VarId, REFERENCE_NODE};
use crate::error::{MnaError, Result};
use crate::netlist::{self, NetlistAst, NetlistLine};

use super::currents::{recover_currents, BranchCurrent, CurrentOrigin};
use super::gauss::gauss_jordan;
use super::mna::assemble;
use super::reduction::{Reduction, VariableKind};
use super::{DEFAULT_MAX_ELEMENTS, DEFAULT_MAX_NODES, DEFAULT_PIVOT_TOLERANCE};

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum number of variables (nodes plus branch currents).
    pub max_nodes: usize,
    /// Maximum number of netlist elements.
    pub max_elements: usize,
    /// Smallest pivot magnitude accepted by the solver.
    pub pivot_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            max_elements: DEFAULT_MAX_ELEMENTS,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variable limit.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set the element limit.
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Set the pivot tolerance.
    ///
    /// The test is absolute: a circuit built from very large resistances
    /// can trip the default of 1e-9 even though it is well posed.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }
}

/// A circuit being analysed.
pub struct Analysis {
    config: AnalysisConfig,
    circuit: Circuit,
}

impl Analysis {
    /// Start an empty analysis.
    pub fn new(config: AnalysisConfig) -> Self {
        let circuit = Circuit::new(config.max_nodes, config.max_elements);
        Self { config, circuit }
    }

    /// Build an analysis from a parsed netlist.
    pub fn from_ast(ast: &NetlistAst, config: AnalysisConfig) -> Result<Self> {
        let circuit = Circuit::from_ast(ast, config.max_nodes, config.max_elements)?;
        Ok(Self { config, circuit })
    }

    /// Parse netlist text (no title line) and build an analysis from it.
    pub fn from_netlist(text: &str, config: AnalysisConfig) -> Result<Self> {
        let ast = netlist::parse(text)?;
        Self::from_ast(&ast, config)
    }

    /// Add one parsed netlist line. Comments are accepted and ignored.
    pub fn add_line(&mut self, line: &NetlistLine) -> Result<Option<ElementId>> {
        self.circuit.add_line(line)
    }

    /// Get a reference to the circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate, reduce, assemble and solve the circuit.
    pub fn run(&self) -> Result<Solution> {
        validate_circuit(&self.circuit)?;

        let reduction = Reduction::build(&self.circuit, self.config.max_nodes)?;
        log::info!(
            "{} nodes, {} variables, {} equations, {} elements",
            reduction.num_nodes,
            reduction.num_variables(),
            reduction.num_equations(),
            self.circuit.elements.len()
        );

        let mut matrix = assemble(&self.circuit, &reduction);
        gauss_jordan(&mut matrix, self.config.pivot_tolerance).map_err(|singular| {
            let variable = reduction
                .variable_in_column(singular.equation)
                .map(|var| reduction.label(var).to_string())
                .unwrap_or_default();
            log::debug!("pivot {} at equation {}", singular.pivot, singular.equation);
            MnaError::SingularSystem {
                equation: singular.equation,
                variable,
            }
        })?;
        log::trace!("solved system:\n{}", matrix);

        let x = matrix.rhs();
        let currents = recover_currents(&self.circuit, &reduction, &x);
        Ok(Solution::new(&self.circuit, &reduction, &x, currents))
    }
}

/// One entry of the solution listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedVariable {
    pub var: VarId,
    pub label: String,
    pub kind: VariableKind,
    /// Column slot; 0 when the variable was merged into the reference
    pub slot: usize,
    /// `None` when not computed
    pub value: Option<f64>,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Solution {
    pub title: Option<String>,
    pub num_nodes: usize,
    pub num_variables: usize,
    pub num_equations: usize,
    pub num_elements: usize,
    variables: Vec<SolvedVariable>,
    currents: Vec<BranchCurrent>,
    element_names: Vec<String>,
}

impl Solution {
    fn new(circuit: &Circuit, reduction: &Reduction, x: &[f64], currents: Vec<BranchCurrent>) -> Self {
        let variables = reduction
            .variables
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, variable)| {
                let var = VarId(index);
                let slot = reduction.col(var);
                SolvedVariable {
                    var,
                    label: variable.label.clone(),
                    kind: variable.kind,
                    slot,
                    value: (slot != 0).then(|| x[slot]),
                }
            })
            .collect();

        Self {
            title: circuit.title.clone(),
            num_nodes: reduction.num_nodes,
            num_variables: reduction.num_variables(),
            num_equations: reduction.num_equations(),
            num_elements: circuit.elements.len(),
            variables,
            currents,
            element_names: circuit.elements.iter().map(|e| e.name().to_string()).collect(),
        }
    }

    /// Every variable except the reference, in index order.
    pub fn variables(&self) -> &[SolvedVariable] {
        &self.variables
    }

    /// Value of a variable; `None` if it was not computed.
    pub fn value(&self, var: VarId) -> Option<f64> {
        if var.is_ground() {
            return Some(0.0);
        }
        self.variables.get(var.0 - 1).and_then(|v| v.value)
    }

    /// Voltage of a node by name.
    pub fn node_voltage(&self, name: &str) -> Option<f64> {
        if name == REFERENCE_NODE {
            return Some(0.0);
        }
        self.variables
            .iter()
            .find(|v| v.kind == VariableKind::Node && v.label == name)
            .and_then(|v| v.value)
    }

    /// Current of an element's main branch: the output current of V, E
    /// and op-amps, the controlling current of F and H.
    pub fn branch_current(&self, element: &str) -> Option<f64> {
        let id = self
            .element_names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(element))
            .map(ElementId)?;
        self.currents.iter().find(|c| c.element == id).map(|c| c.value)
    }

    /// Branch current by label (`jV1`, `jyH1`, ...).
    pub fn current(&self, label: &str) -> Option<f64> {
        self.currents.iter().find(|c| c.label == label).map(|c| c.value)
    }

    /// All branch currents.
    pub fn currents(&self) -> &[BranchCurrent] {
        &self.currents
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        for v in &self.variables {
            let kind = match v.kind {
                VariableKind::Node => "Voltage",
                VariableKind::Current { .. } => "Current",
            };
            match v.value {
                Some(value) => writeln!(f, "{} {} ({}): {}", kind, v.label, v.slot, value)?,
                None => writeln!(f, "{} {} ({}): not computed", kind, v.label, v.slot)?,
            }
        }

        if !self.currents.is_empty() {
            writeln!(f, "Branch currents:")?;
            for c in &self.currents {
                match c.origin {
                    CurrentOrigin::Solved => writeln!(f, "{}: {}", c.label, c.value)?,
                    CurrentOrigin::Recovered => writeln!(f, "{}: {} (from KCL)", c.label, c.value)?,
                }
            }
        }
        Ok(())
    }
}
