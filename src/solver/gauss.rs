//! Gauss-Jordan elimination with pivot search.

use super::mna::AugmentedMatrix;

/// The pivot of an equation fell below tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Singular {
    /// Equation (slot) where elimination stopped
    pub equation: usize,
    /// Largest-magnitude entry found in the pivot column
    pub pivot: f64,
}

/// Solve the augmented system in place.
///
/// For each equation `i` in order, the row with the largest magnitude in
/// column `i` among rows `i..=n` becomes the pivot row. The pivot row is
/// normalised and column `i` is eliminated from every other row. On
/// success the right-hand-side column holds the solution, slot by slot.
pub fn gauss_jordan(matrix: &mut AugmentedMatrix, tolerance: f64) -> Result<(), Singular> {
    let n = matrix.size();
    let rhs = matrix.rhs_col();

    for i in 1..=n {
        let mut pivot = 0.0_f64;
        let mut pivot_row = i;
        for l in i..=n {
            let value = matrix.get(l, i);
            if value.abs() > pivot.abs() {
                pivot_row = l;
                pivot = value;
            }
        }

        matrix.swap_rows(i, pivot_row);

        if pivot.abs() < tolerance {
            return Err(Singular { equation: i, pivot });
        }

        // Right to left so column i is still intact while the others use it
        for j in (1..=rhs).rev() {
            let p = matrix.get(i, j) / pivot;
            matrix.set(i, j, p);
            if p == 0.0 {
                continue;
            }
            for l in 1..=n {
                if l != i {
                    let factor = matrix.get(l, i);
                    matrix.set(l, j, matrix.get(l, j) - factor * p);
                }
            }
        }
    }

    Ok(())
}
