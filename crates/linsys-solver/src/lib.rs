//! Dense linear system engine.
//!
//! Solves `A x = b` for a real n×m matrix `A` with three independent methods
//! and classifies every failure:
//!
//! - **Gaussian elimination** with partial pivoting and back-substitution
//! - **Gauss-Jordan** reduction to reduced row-echelon form
//! - **Cramer's rule** with determinants by recursive cofactor expansion
//!
//! The [`Orchestrator`] runs any subset of the methods on the same system,
//! optionally in parallel, and returns an [`ExecutionReport`] in request
//! order with per-method timing, so results can be cross-validated.
//!
//! ```
//! use linsys_solver::{Method, Orchestrator, matrix_from_rows, vector_from_slice};
//!
//! let a = matrix_from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let b = vector_from_slice(&[3.0, 5.0]);
//! let report = Orchestrator::default().run(&a, &b, &Method::ALL);
//! assert!(report.cross_check_default().agree);
//! assert_eq!(report.solution(Method::Cramer), Some(&[0.8, 1.4][..]));
//! ```

pub mod augmented;
pub mod error;
pub mod matrix;
pub mod methods;
pub mod orchestrator;
pub mod policy;
pub mod report;
pub mod validation;

pub use augmented::AugmentedMatrix;
pub use error::{FailureKind, Result, SolveError};
pub use matrix::{
    determinant, determinant_capped, matrix_from_rows, minor, replace_column, vector_from_slice,
};
pub use methods::{
    CramerSolver, GaussJordanSolver, GaussSolver, LinearSolver, Method, Solution, UnknownMethod,
    solver_for,
};
pub use orchestrator::{Execution, Orchestrator, run_solver, solve};
pub use policy::{CRAMER_MAX_ORDER, ROUND_DECIMALS, SolverPolicy, ZERO_THRESHOLD};
pub use report::{CrossCheck, ExecutionReport, MethodReport, Outcome};
pub use validation::{validate_shape, validate_square};

// Re-exported so collaborators can build inputs without a direct nalgebra dependency.
pub use nalgebra::{DMatrix, DVector};
