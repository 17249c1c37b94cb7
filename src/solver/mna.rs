//! Augmented matrix assembly.

use std::fmt;

use crate::circuit::{Circuit, VarId};
use crate::components::Element;

use super::reduction::Reduction;

/// Augmented nodal system `[A | z]`.
///
/// Slots are numbered `1..=size` as the partitions number them. Row 0 and
/// column 0 belong to the reference node: they are allocated so slot
/// numbers index directly, but never receive an entry.
#[derive(Debug, Clone)]
pub struct AugmentedMatrix {
    /// Entries, row-major, `(size + 1) x (size + 2)`
    data: Vec<f64>,
    /// Number of equations
    size: usize,
}

impl AugmentedMatrix {
    /// Create a zeroed system of `size` equations.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; (size + 1) * (size + 2)],
            size,
        }
    }

    /// Number of equations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Column holding the right-hand side.
    pub fn rhs_col(&self) -> usize {
        self.size + 1
    }

    fn width(&self) -> usize {
        self.size + 2
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width() + col]
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let w = self.width();
        self.data[row * w + col] = value;
    }

    /// Add to the coefficient at (row, col). Dropped if either is slot 0.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if row == 0 || col == 0 {
            return;
        }
        let w = self.width();
        self.data[row * w + col] += value;
    }

    /// Add to the right-hand side of `row`. Dropped for slot 0.
    pub fn add_rhs(&mut self, row: usize, value: f64) {
        let rhs = self.rhs_col();
        self.add(row, rhs, value);
    }

    /// Swap two rows, right-hand side included.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let w = self.width();
        for col in 0..w {
            self.data.swap(a * w + col, b * w + col);
        }
    }

    /// Right-hand side column, indexed by slot (entry 0 is always 0).
    ///
    /// After a successful solve this is the solution vector.
    pub fn rhs(&self) -> Vec<f64> {
        let rhs = self.rhs_col();
        (0..=self.size).map(|row| self.get(row, rhs)).collect()
    }
}

/// Compact rendering: `+1.0` for non-zero entries, `...` for zeros.
impl fmt::Display for AugmentedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.size {
            for col in 1..=self.rhs_col() {
                let value = self.get(row, col);
                if value != 0.0 {
                    write!(f, "{:+3.1} ", value)?;
                } else {
                    write!(f, " ... ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Places element contributions through the row/column partitions.
pub struct Stamper<'a> {
    matrix: &'a mut AugmentedMatrix,
    reduction: &'a Reduction,
}

impl<'a> Stamper<'a> {
    pub fn new(matrix: &'a mut AugmentedMatrix, reduction: &'a Reduction) -> Self {
        Self { matrix, reduction }
    }

    /// Stamp a transconductance `g` from control pair `(n3, n4)` into
    /// output pair `(n1, n2)`:
    ///   A[n1,n3] += g
    ///   A[n2,n4] += g
    ///   A[n1,n4] -= g
    ///   A[n2,n3] -= g
    pub fn transconductance(&mut self, g: f64, n1: VarId, n2: VarId, n3: VarId, n4: VarId) {
        let r = self.reduction;
        self.matrix.add(r.row(n1), r.col(n3), g);
        self.matrix.add(r.row(n2), r.col(n4), g);
        self.matrix.add(r.row(n1), r.col(n4), -g);
        self.matrix.add(r.row(n2), r.col(n3), -g);
    }

    /// Stamp a conductance between two variables.
    pub fn conductance(&mut self, g: f64, a: VarId, b: VarId) {
        self.transconductance(g, a, b, a, b);
    }

    /// Stamp a current source. Current flows out of `a` into `b`.
    pub fn current(&mut self, i: f64, a: VarId, b: VarId) {
        let r = self.reduction;
        self.matrix.add_rhs(r.row(a), -i);
        self.matrix.add_rhs(r.row(b), i);
    }

    /// Stamp one element.
    pub fn stamp(&mut self, element: &Element) {
        let ground = VarId::GROUND;
        let aux = self.reduction.aux(element.id());
        // Auxiliaries were assigned by the reduction of this same circuit
        let x = aux.x.unwrap_or(ground);
        let y = aux.y.unwrap_or(ground);

        match element {
            Element::Resistor(r) => {
                self.conductance(r.conductance(), r.nodes[0], r.nodes[1]);
            }

            Element::Vccs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                self.transconductance(s.gain, a, b, c, d);
            }

            Element::CurrentSource(i) => {
                self.current(i.current, i.nodes[0], i.nodes[1]);
            }

            Element::VoltageSource(v) => {
                self.transconductance(1.0, ground, x, v.nodes[0], v.nodes[1]);
                self.current(v.voltage, x, ground);
            }

            Element::Vcvs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                self.transconductance(1.0, ground, x, a, b);
                self.transconductance(s.gain, x, ground, c, d);
            }

            Element::Cccs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                self.transconductance(s.gain, a, b, x, ground);
                self.transconductance(1.0, c, d, x, ground);
            }

            Element::Ccvs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                self.transconductance(1.0, ground, y, a, b);
                self.transconductance(s.gain, y, ground, x, ground);
                self.transconductance(1.0, c, d, x, ground);
            }

            // Fully represented by its row/column merge
            Element::OpAmp(_) => {}
        }
    }
}

/// Assemble the augmented system for a reduced circuit.
pub fn assemble(circuit: &Circuit, reduction: &Reduction) -> AugmentedMatrix {
    let mut matrix = AugmentedMatrix::new(reduction.num_equations());
    let mut stamper = Stamper::new(&mut matrix, reduction);
    for element in &circuit.elements {
        stamper.stamp(element);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("system after stamping {}:\n{}", element.name(), stamper.matrix);
        }
    }
    matrix
}
