//! Gauss-Jordan reduction to reduced row-echelon form.

use log::debug;
use nalgebra::{DMatrix, DVector};

use super::elimination::{classify, place_pivot, select_pivot};
use super::{LinearSolver, Method, Solution};
use crate::augmented::AugmentedMatrix;
use crate::error::Result;
use crate::policy::SolverPolicy;
use crate::validation::check_system;

/// Full reduction: every pivot column is cleared above and below the pivot,
/// so the solution is read straight from the constant column.
///
/// O(n²·m). Same pivot rule and thresholds as [`super::GaussSolver`], hence
/// the same rank and failure classification.
pub struct GaussJordanSolver;

impl LinearSolver for GaussJordanSolver {
    fn method(&self) -> Method {
        Method::GaussJordan
    }

    fn solve(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        policy: &SolverPolicy,
    ) -> Result<Solution> {
        policy.validate()?;
        check_system(a, b)?;
        let mut aug = AugmentedMatrix::build(a, b)?;
        let (n, m) = (aug.rows(), aug.unknowns());

        let mut rank = 0;
        let mut pivot_cols = Vec::with_capacity(m.min(n));
        for col in 0..m {
            if rank == n {
                break;
            }
            let Some((pivot_row, pivot)) = select_pivot(&aug, col, rank, policy) else {
                debug!("gauss-jordan: column {col} has no usable pivot, skipping");
                continue;
            };
            place_pivot(&mut aug, rank, pivot_row, pivot);
            for row in (0..n).filter(|&row| row != rank) {
                let factor = aug.get(row, col);
                if factor != 0.0 {
                    aug.subtract_row(row, rank, factor);
                }
            }
            pivot_cols.push(col);
            rank += 1;
        }
        debug!("gauss-jordan: rank {rank} of {n}x{m} system");

        classify(&aug, rank, policy)?;

        let mut x = vec![0.0; m];
        for (row, &col) in pivot_cols.iter().enumerate() {
            x[col] = aug.rhs(row);
        }

        Solution::rounded(Method::GaussJordan, x, rank, policy)
    }
}
