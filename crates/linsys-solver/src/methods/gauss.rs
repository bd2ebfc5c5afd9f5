//! Gaussian elimination with partial pivoting and back-substitution.

use log::debug;
use nalgebra::{DMatrix, DVector};

use super::elimination::{classify, place_pivot, select_pivot};
use super::{LinearSolver, Method, Solution};
use crate::augmented::AugmentedMatrix;
use crate::error::Result;
use crate::policy::SolverPolicy;
use crate::validation::check_system;

/// Forward elimination to row-echelon form, then back-substitution.
///
/// O(n·m·min(n, m)). Accepts rectangular systems: a tall consistent system of
/// full column rank still has a unique solution.
pub struct GaussSolver;

impl LinearSolver for GaussSolver {
    fn method(&self) -> Method {
        Method::Gauss
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
                debug!("gauss: column {col} has no usable pivot, skipping");
                continue;
            };
            place_pivot(&mut aug, rank, pivot_row, pivot);
            for row in (rank + 1)..n {
                let factor = aug.get(row, col);
                if factor != 0.0 {
                    aug.subtract_row(row, rank, factor);
                }
            }
            pivot_cols.push(col);
            rank += 1;
        }
        debug!("gauss: rank {rank} of {n}x{m} system");

        classify(&aug, rank, policy)?;

        let mut x = vec![0.0; m];
        for row in (0..rank).rev() {
            let p = pivot_cols[row];
            let mut acc = aug.rhs(row);
            for col in (p + 1)..m {
                acc -= aug.get(row, col) * x[col];
            }
            x[p] = acc / aug.get(row, p);
        }

        Solution::rounded(Method::Gauss, x, rank, policy)
    }
}
