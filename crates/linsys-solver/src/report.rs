//! Execution reports: per-method outcome, timing and cross-validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, SolveError};
use crate::methods::{Method, Solution};
use crate::policy::SolverPolicy;

/// Result of one method on one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Solved {
        values: Vec<f64>,
        rank: usize,
    },
    Failed {
        kind: FailureKind,
        /// Rank reached before the failure, if elimination ran
        rank: Option<usize>,
        message: String,
    },
}

impl Outcome {
    pub fn from_result(result: Result<Solution, SolveError>) -> Self {
        match result {
            Ok(solution) => Outcome::Solved {
                values: solution.values,
                rank: solution.rank,
            },
            Err(err) => Outcome::Failed {
                kind: err.kind(),
                rank: err.rank(),
                message: err.to_string(),
            },
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Outcome::Solved { values, .. } => Some(values),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Outcome::Solved { .. } => None,
            Outcome::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn rank(&self) -> Option<usize> {
        match self {
            Outcome::Solved { rank, .. } => Some(*rank),
            Outcome::Failed { rank, .. } => *rank,
        }
    }
}

/// One entry of an [`ExecutionReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReport {
    pub method: Method,
    /// Wall-clock time of the solve, copy-in included
    pub elapsed: Duration,
    pub outcome: Outcome,
    /// ‖A·x − b‖₂ of the reported (rounded) solution
    pub residual_norm: Option<f64>,
}

impl MethodReport {
    /// Failure message, if the method failed.
    pub fn detail(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { message, .. } => Some(message),
            Outcome::Solved { .. } => None,
        }
    }
}

/// Pairwise comparison of every successful solution in a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossCheck {
    /// Number of successful solutions compared
    pub compared: usize,
    /// Largest absolute component difference over all pairs
    pub max_deviation: f64,
    pub tolerance: f64,
    pub agree: bool,
}

/// Per-method outcomes, in the order the methods were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub policy: SolverPolicy,
    pub entries: Vec<MethodReport>,
}

impl ExecutionReport {
    pub fn get(&self, method: Method) -> Option<&MethodReport> {
        self.entries.iter().find(|entry| entry.method == method)
    }

    pub fn solution(&self, method: Method) -> Option<&[f64]> {
        self.get(method).and_then(|entry| entry.outcome.values())
    }

    pub fn methods(&self) -> Vec<Method> {
        self.entries.iter().map(|entry| entry.method).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome.is_solved())
    }

    /// Detected rank per method (`None` where the method never eliminated).
    pub fn ranks(&self) -> Vec<(Method, Option<usize>)> {
        self.entries
            .iter()
            .map(|entry| (entry.method, entry.outcome.rank()))
            .collect()
    }

    /// Successful entry with the least elapsed time.
    pub fn fastest(&self) -> Option<&MethodReport> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_solved())
            .min_by_key(|entry| entry.elapsed)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.entries.iter().map(|entry| entry.elapsed).sum()
    }

    /// Compare successful solutions pairwise against `tolerance`.
    ///
    /// Solutions of different lengths, or with a non-finite entry, never agree. The comparison allows a
    /// relative slack of 1e-9 on `tolerance`, so two values rounded to
    /// opposite sides of the last kept digit still agree.
    pub fn cross_check(&self, tolerance: f64) -> CrossCheck {
        let solutions: Vec<&[f64]> = self
            .entries
            .iter()
            .filter_map(|entry| entry.outcome.values())
            .collect();

        let mut max_deviation: f64 = 0.0;
        let mut agree = true;
        for (i, lhs) in solutions.iter().enumerate() {
            for rhs in &solutions[i + 1..] {
                if lhs.len() != rhs.len() {
                    agree = false;
                    max_deviation = f64::INFINITY;
                    continue;
                }
                for (x, y) in lhs.iter().zip(rhs.iter()) {
                    if !x.is_finite() || !y.is_finite() {
                        agree = false;
                        max_deviation = f64::INFINITY;
                        continue;
                    }
                    max_deviation = max_deviation.max((x - y).abs());
                }
            }
        }

        CrossCheck {
            compared: solutions.len(),
            max_deviation,
            tolerance,
            agree: agree && max_deviation <= tolerance * (1.0 + 1e-9),
        }
    }

    /// [`Self::cross_check`] at the policy's rounding precision.
    pub fn cross_check_default(&self) -> CrossCheck {
        self.cross_check(self.policy.agreement_tolerance())
    }
}
