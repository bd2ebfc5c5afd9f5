//! Pivot selection and outcome classification shared by the elimination solvers.

use crate::augmented::AugmentedMatrix;
use crate::error::{Result, SolveError};
use crate::policy::SolverPolicy;

/// Row in `from_row..` with the largest |value| in `col`.
///
/// The first row reaching the maximum wins. Returns `None` when that maximum
/// is numerically zero, i.e. the column cannot be pivoted.
pub(super) fn select_pivot(
    aug: &AugmentedMatrix,
    col: usize,
    from_row: usize,
    policy: &SolverPolicy,
) -> Option<(usize, f64)> {
    let mut best_row = from_row;
    let mut best_abs = aug.get(from_row, col).abs();
    for row in (from_row + 1)..aug.rows() {
        let candidate = aug.get(row, col).abs();
        if candidate > best_abs {
            best_abs = candidate;
            best_row = row;
        }
    }

    if policy.is_zero(best_abs) {
        None
    } else {
        Some((best_row, aug.get(best_row, col)))
    }
}

/// Move the pivot into row `rank` and normalize that row.
pub(super) fn place_pivot(aug: &mut AugmentedMatrix, rank: usize, pivot_row: usize, pivot: f64) {
    aug.swap_rows(rank, pivot_row);
    aug.scale_row(rank, pivot);
}

/// Classify a fully eliminated system.
///
/// Rows at or below `rank` carry only numerically-zero coefficients; a
/// nonzero constant there means `0 = c`. Otherwise, any unpivoted column is
/// a free variable.
pub(super) fn classify(aug: &AugmentedMatrix, rank: usize, policy: &SolverPolicy) -> Result<()> {
    if (rank..aug.rows()).any(|row| !policy.is_zero(aug.rhs(row))) {
        return Err(SolveError::InconsistentSystem { rank });
    }
    if rank < aug.unknowns() {
        return Err(SolveError::InfiniteSolutions {
            rank,
            unknowns: aug.unknowns(),
        });
    }
    Ok(())
}
