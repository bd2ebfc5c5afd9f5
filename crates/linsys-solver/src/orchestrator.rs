//! Runs a set of solvers against one system and collects an ordered report.
//!
//! Every solver invocation is an isolated unit of work: it builds its own
//! working copy, shares no mutable state and is timed on its own. With
//! [`Execution::Parallel`] the units are fanned out on the rayon pool;
//! the report keeps the requested order either way.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FailureKind;
use crate::methods::{LinearSolver, Method, solver_for};
use crate::policy::SolverPolicy;
use crate::report::{ExecutionReport, MethodReport, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    #[default]
    Parallel,
    Sequential,
}

/// Dispatches requested methods and aggregates their outcomes.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    policy: SolverPolicy,
    execution: Execution,
}

impl Orchestrator {
    pub fn new(policy: SolverPolicy) -> Self {
        Self {
            policy,
            execution: Execution::default(),
        }
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Run `methods` on `(a, b)`. An empty list runs nothing.
    pub fn run(&self, a: &DMatrix<f64>, b: &DVector<f64>, methods: &[Method]) -> ExecutionReport {
        let solvers: Vec<Box<dyn LinearSolver>> =
            methods.iter().map(|&method| solver_for(method)).collect();
        let solvers: Vec<&dyn LinearSolver> = solvers.iter().map(|s| s.as_ref()).collect();
        self.run_solvers(a, b, &solvers)
    }

    /// Run every method in canonical order.
    pub fn run_all(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> ExecutionReport {
        self.run(a, b, &Method::ALL)
    }

    /// Run arbitrary solver implementations, one report entry each.
    pub fn run_solvers(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        solvers: &[&dyn LinearSolver],
    ) -> ExecutionReport {
        let policy = &self.policy;
        let entries = match self.execution {
            Execution::Parallel => solvers
                .par_iter()
                .map(|solver| run_solver(*solver, a, b, policy))
                .collect(),
            Execution::Sequential => solvers
                .iter()
                .map(|solver| run_solver(*solver, a, b, policy))
                .collect(),
        };

        ExecutionReport {
            policy: self.policy,
            entries,
        }
    }
}

/// Solve once with `method`, timed, failures classified.
pub fn solve(
    method: Method,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    policy: &SolverPolicy,
) -> MethodReport {
    run_solver(solver_for(method).as_ref(), a, b, policy)
}

/// Time one solver and turn its result, or its panic, into a report entry.
pub fn run_solver(
    solver: &dyn LinearSolver,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    policy: &SolverPolicy,
) -> MethodReport {
    let method = solver.method();
    let started = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| solver.solve(a, b, policy)));
    let elapsed = started.elapsed();

    let (outcome, residual_norm) = match result {
        Ok(Ok(solution)) => {
            let residual = residual_norm(a, b, &solution.values);
            (Outcome::from_result(Ok(solution)), residual)
        }
        Ok(Err(err)) => (Outcome::from_result(Err(err)), None),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("{method}: solver panicked: {message}");
            (
                Outcome::Failed {
                    kind: FailureKind::Internal,
                    rank: None,
                    message,
                },
                None,
            )
        }
    };

    match &outcome {
        Outcome::Solved { rank, .. } => {
            info!("{method}: solved (rank {rank}) in {elapsed:?}")
        }
        Outcome::Failed { kind, .. } => info!("{method}: {kind} after {elapsed:?}"),
    }

    MethodReport {
        method,
        elapsed,
        outcome,
        residual_norm,
    }
}

fn residual_norm(a: &DMatrix<f64>, b: &DVector<f64>, x: &[f64]) -> Option<f64> {
    if x.len() != a.ncols() {
        return None;
    }
    let x = DVector::from_column_slice(x);
    Some((a * x - b).norm())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "solver panicked".to_string()
    }
}
