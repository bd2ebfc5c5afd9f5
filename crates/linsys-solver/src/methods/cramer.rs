//! Cramer's rule with determinants by recursive cofactor expansion.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use super::{LinearSolver, Method, Solution};
use crate::error::{Result, SolveError};
use crate::matrix::{cofactor_determinant, replace_column};
use crate::policy::SolverPolicy;
use crate::validation::check_square_system;

/// `x_i = det(A_i) / det(A)`, where `A_i` is `A` with column `i` replaced by `b`.
///
/// Square, non-singular systems only. Each determinant is O(n!), and n + 1 of
/// them are needed, so orders above `policy.cramer_max_order` are refused.
pub struct CramerSolver;

impl LinearSolver for CramerSolver {
    fn method(&self) -> Method {
        Method::Cramer
    }

    fn solve(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        policy: &SolverPolicy,
    ) -> Result<Solution> {
        policy.validate()?;
        check_square_system(a, b)?;
        let n = a.nrows();
        if let Some(limit) = policy.cramer_max_order
            && n > limit
        {
            warn!("cramer: refusing order {n} system (limit {limit})");
            return Err(SolveError::SizeLimitExceeded { order: n, limit });
        }

        let det = cofactor_determinant(a);
        debug!("cramer: main determinant {det:e}");
        if !det.is_finite() {
            return Err(SolveError::NumericalOverflow("main determinant".into()));
        }
        if policy.is_zero(det) {
            return Err(SolveError::SingularMatrix { determinant: det });
        }

        let mut raw = Vec::with_capacity(n);
        for i in 0..n {
            let det_i = cofactor_determinant(&replace_column(a, i, b));
            if !det_i.is_finite() {
                return Err(SolveError::NumericalOverflow(format!("determinant of A_{i}")));
            }
            raw.push(det_i / det);
        }

        Solution::rounded(Method::Cramer, raw, n, policy)
    }
}
