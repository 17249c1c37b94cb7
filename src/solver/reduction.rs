//! Variable reduction: auxiliary branch currents and row/column merges.
//!
//! Ideal elements are modelled without extra equations wherever possible.
//! Summing the KCL rows of two nodes frees the current flowing between
//! them, and identifying two columns makes two unknowns one. Every element
//! that introduces an auxiliary variable also merges away one row, so the
//! equation count never exceeds the node count, and every op-amp lowers
//! it by one.

use crate::circuit::{Circuit, ElementId, VarId};
use crate::components::Element;
use crate::error::{Capacity, MnaError, Result};

use super::partition::Partition;

/// What a variable index stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Voltage of a circuit node
    Node,
    /// Branch current introduced by an element
    Current { element: ElementId },
}

/// A solvable quantity with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub label: String,
    pub kind: VariableKind,
}

/// Auxiliary variables assigned to one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuxVars {
    /// Output current (V, E), controlling current (F, H)
    pub x: Option<VarId>,
    /// Output current (H only)
    pub y: Option<VarId>,
}

/// Result of reducing a circuit: the frozen partitions and variable table.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Equation slot of every variable
    pub rows: Partition,
    /// Unknown slot of every variable
    pub cols: Partition,
    /// Variable table; entry 0 is the reference node
    pub variables: Vec<Variable>,
    /// Auxiliary variables per element, indexed by element id
    pub aux: Vec<AuxVars>,
    /// Number of non-reference nodes
    pub num_nodes: usize,
}

impl Reduction {
    /// Allocate auxiliary variables and apply every element's merges.
    ///
    /// `max_variables` bounds nodes plus auxiliaries.
    pub fn build(circuit: &Circuit, max_variables: usize) -> Result<Self> {
        let num_nodes = circuit.num_nodes();
        let variables = circuit
            .symbols
            .names()
            .iter()
            .map(|name| Variable {
                label: name.clone(),
                kind: VariableKind::Node,
            })
            .collect();

        let mut reduction = Self {
            rows: Partition::identity(num_nodes),
            cols: Partition::identity(num_nodes),
            variables,
            aux: vec![AuxVars::default(); circuit.elements.len()],
            num_nodes,
        };

        let mut reducer = Reducer {
            reduction: &mut reduction,
            max_variables,
        };
        for element in &circuit.elements {
            reducer.reduce(element)?;
        }

        debug_assert_eq!(reduction.rows.live_count(), reduction.cols.live_count());
        reduction.log_tables(circuit);
        Ok(reduction)
    }

    /// Number of equations (and unknowns) left after merging.
    pub fn num_equations(&self) -> usize {
        self.rows.live_count()
    }

    /// Number of variables, nodes plus auxiliaries, excluding the reference.
    pub fn num_variables(&self) -> usize {
        self.variables.len() - 1
    }

    /// Equation slot of a variable.
    pub fn row(&self, var: VarId) -> usize {
        self.rows.slot(var)
    }

    /// Unknown slot of a variable.
    pub fn col(&self, var: VarId) -> usize {
        self.cols.slot(var)
    }

    /// Auxiliary variables of an element.
    pub fn aux(&self, id: ElementId) -> AuxVars {
        self.aux[id.0]
    }

    /// Display label of a variable.
    pub fn label(&self, var: VarId) -> &str {
        &self.variables[var.0].label
    }

    /// Variable whose unknown lives in column `slot`, if any.
    pub fn variable_in_column(&self, slot: usize) -> Option<VarId> {
        if slot == 0 {
            return None;
        }
        self.cols.slots().iter().position(|&s| s == slot).map(VarId)
    }

    fn log_tables(&self, circuit: &Circuit) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("internal variables:");
        for (index, variable) in self.variables.iter().enumerate() {
            log::debug!("  {} -> {} ({})", index, variable.label, self.cols.slots()[index]);
        }
        log::debug!("final internal netlist:");
        for element in &circuit.elements {
            let aux = self.aux(element.id());
            match (aux.x, aux.y) {
                (Some(x), Some(y)) => log::debug!("  {}  currents jx, jy: {}, {}", element, x.0, y.0),
                (Some(x), None) => log::debug!("  {}  current jx: {}", element, x.0),
                _ => log::debug!("  {}", element),
            }
        }
    }
}

/// Applies one element at a time to a reduction under construction.
struct Reducer<'a> {
    reduction: &'a mut Reduction,
    max_variables: usize,
}

impl Reducer<'_> {
    fn reduce(&mut self, element: &Element) -> Result<()> {
        let ground = VarId::GROUND;
        match element {
            Element::VoltageSource(v) => {
                let x = self.allocate(element, "j")?;
                self.reduction.aux[v.id.0].x = Some(x);
                self.merge_rows(element, v.nodes[0], v.nodes[1])?;
                self.merge_cols(element, ground, x)?;
            }
            Element::Vcvs(s) => {
                let x = self.allocate(element, "j")?;
                self.reduction.aux[s.id.0].x = Some(x);
                let (a, b) = s.output();
                self.merge_rows(element, a, b)?;
                self.merge_cols(element, ground, x)?;
            }
            Element::Cccs(s) => {
                let x = self.allocate(element, "j")?;
                self.reduction.aux[s.id.0].x = Some(x);
                let (c, d) = s.control();
                self.merge_rows(element, x, ground)?;
                self.merge_cols(element, c, d)?;
            }
            Element::Ccvs(s) => {
                let x = self.allocate(element, "jx")?;
                let y = self.allocate(element, "jy")?;
                self.reduction.aux[s.id.0] = AuxVars {
                    x: Some(x),
                    y: Some(y),
                };
                let (a, b) = s.output();
                let (c, d) = s.control();
                self.merge_rows(element, a, b)?;
                self.merge_cols(element, ground, y)?;
                self.merge_rows(element, x, ground)?;
                self.merge_cols(element, c, d)?;
            }
            Element::OpAmp(o) => {
                let (a, b) = o.output();
                let (c, d) = o.input();
                log::debug!("op-amp {}: output {} {}; input {} {}", o.name, a.0, b.0, c.0, d.0);
                self.merge_rows(element, a, b)?;
                self.merge_cols(element, c, d)?;
            }
            Element::Resistor(_) | Element::CurrentSource(_) | Element::Vccs(_) => {}
        }
        Ok(())
    }

    fn allocate(&mut self, element: &Element, prefix: &str) -> Result<VarId> {
        let reduction = &mut *self.reduction;
        if reduction.num_variables() == self.max_variables {
            return Err(MnaError::capacity(
                Capacity::Variables,
                self.max_variables,
                element.name(),
                element.line(),
            ));
        }
        let var = reduction.rows.push();
        let col = reduction.cols.push();
        debug_assert_eq!(var, col);
        reduction.variables.push(Variable {
            label: format!("{}{}", prefix, element.name()),
            kind: VariableKind::Current {
                element: element.id(),
            },
        });
        log::debug!("{}: auxiliary variable {} = {}", element.name(), var.0, reduction.label(var));
        Ok(var)
    }

    fn merge_rows(&mut self, element: &Element, a: VarId, b: VarId) -> Result<()> {
        self.reduction.rows.merge(a, b).map_err(|conflict| {
            MnaError::invalid_circuit(
                element.name(),
                element.line(),
                format!(
                    "equations of {} and {} are already combined (row {}); \
                     check for loops of voltage sources or op-amp outputs",
                    self.reduction.label(a),
                    self.reduction.label(b),
                    conflict.slot
                ),
            )
        })?;
        log::debug!(
            "{}: merge rows {} {} -> {}",
            element.name(),
            a.0,
            b.0,
            self.reduction.rows
        );
        Ok(())
    }

    fn merge_cols(&mut self, element: &Element, a: VarId, b: VarId) -> Result<()> {
        self.reduction.cols.merge(a, b).map_err(|conflict| {
            MnaError::invalid_circuit(
                element.name(),
                element.line(),
                format!(
                    "unknowns {} and {} are already identified (column {}); \
                     check for shorted controls or op-amp inputs",
                    self.reduction.label(a),
                    self.reduction.label(b),
                    conflict.slot
                ),
            )
        })?;
        log::debug!(
            "{}: merge columns {} {} -> {}",
            element.name(),
            a.0,
            b.0,
            self.reduction.cols
        );
        Ok(())
    }
}
