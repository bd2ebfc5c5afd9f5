//! Solver trait and result type.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::Method;
use crate::error::{Result, SolveError};
use crate::policy::SolverPolicy;

/// A unique solution of `A x = b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub method: Method,
    /// Solution entries, rounded to the policy precision
    pub values: Vec<f64>,
    /// Rank detected while solving (equals the number of unknowns)
    pub rank: usize,
}

impl Solution {
    /// Round `raw` to the policy precision, refusing any non-finite entry.
    pub fn rounded(
        method: Method,
        raw: Vec<f64>,
        rank: usize,
        policy: &SolverPolicy,
    ) -> Result<Self> {
        let values: Vec<f64> = raw.into_iter().map(|v| policy.round(v)).collect();
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(SolveError::NumericalOverflow(format!("x[{i}]")));
        }
        Ok(Self {
            method,
            values,
            rank,
        })
    }
}

/// Trait for a direct solving method.
///
/// Implementations are stateless: every call builds its own working copy of
/// the system, so one instance may serve concurrent solves.
pub trait LinearSolver: Send + Sync {
    fn method(&self) -> Method;

    /// Solve `A x = b`, or classify why no unique solution exists.
    ///
    /// Never returns a partial solution.
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>, policy: &SolverPolicy)
    -> Result<Solution>;
}
