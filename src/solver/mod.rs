//! Compact MNA (Modified Nodal Analysis) solver.
//!
//! Classic MNA adds one equation per voltage-defined element. The compact
//! form avoids most of them by merging rows and columns of the nodal
//! system instead:
//!
//! ```text
//!   row merge    KCL(a) + KCL(b) -> one equation, the current a->b drops out
//!   column merge V(a) == V(b)    -> one unknown
//! ```
//!
//! An ideal voltage source between `a` and `b` gets an auxiliary current
//! `jx`. The rows of `a` and `b` are summed, so the source current drops
//! out, and the column of `jx` is merged with ground. The row of `jx`
//! stays on its own and holds `V(a) - V(b) = V`. An ideal op-amp merges
//! its output rows and its input columns and stamps nothing. The
//! number of equations never exceeds the number of non-reference nodes.
//!
//! Pipeline, one [`Analysis`] per run:
//!
//! 1. [`Reduction::build`] allocates auxiliaries and applies every merge
//! 2. [`assemble`] stamps each element through the partitions
//! 3. [`gauss_jordan`] solves the augmented system in place
//! 4. [`recover_currents`] fills in the currents the compact system dropped

mod currents;
mod gauss;
mod mna;
mod partition;
mod reduction;
mod session;

pub use currents::{recover_currents, BranchCurrent, CurrentOrigin};
pub use gauss::{gauss_jordan, Singular};
pub use mna::{assemble, AugmentedMatrix, Stamper};
pub use partition::{MergeConflict, Partition};
pub use reduction::{AuxVars, Reduction, Variable, VariableKind};
pub use session::{Analysis, AnalysisConfig, Solution, SolvedVariable};

/// Smallest accepted pivot magnitude (absolute, not scaled).
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-9;

/// Default bound on variables (nodes plus branch currents).
pub const DEFAULT_MAX_NODES: usize = 50;

/// Default bound on netlist elements.
pub const DEFAULT_MAX_ELEMENTS: usize = 50;
