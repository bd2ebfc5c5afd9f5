//! Solver implementations.
//!
//! Three independent algorithms behind one [`LinearSolver`] trait:
//!
//! - **Gauss**: forward elimination with partial pivoting, then back-substitution.
//! - **Gauss-Jordan**: full reduction to reduced row-echelon form, direct read-off.
//! - **Cramer**: determinants by cofactor expansion; square, non-singular systems only.
//!
//! The two elimination solvers share pivot selection and failure
//! classification (see `elimination`), but each tracks its own rank.

pub mod cramer;
mod elimination;
pub mod gauss;
pub mod gauss_jordan;
pub mod traits;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cramer::CramerSolver;
pub use gauss::GaussSolver;
pub use gauss_jordan::GaussJordanSolver;
pub use traits::{LinearSolver, Solution};

/// Identifier of a solving method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Gauss,
    GaussJordan,
    Cramer,
}

impl Method {
    /// Every method, in canonical order.
    pub const ALL: [Method; 3] = [Method::Gauss, Method::GaussJordan, Method::Cramer];

    pub fn name(self) -> &'static str {
        match self {
            Method::Gauss => "gauss",
            Method::GaussJordan => "gauss-jordan",
            Method::Cramer => "cramer",
        }
    }

    /// Human-readable label, shown next to the fastest method in reports.
    pub fn label(self) -> &'static str {
        match self {
            Method::Gauss => "Gaussian elimination",
            Method::GaussJordan => "Gauss-Jordan",
            Method::Cramer => "Cramer's rule",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown method '{}' (expected gauss, gauss-jordan or cramer)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gauss" | "gaussian" => Ok(Method::Gauss),
            "gauss-jordan" | "gaussjordan" | "jordan" => Ok(Method::GaussJordan),
            "cramer" => Ok(Method::Cramer),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Returns the solver implementing `method`.
pub fn solver_for(method: Method) -> Box<dyn LinearSolver> {
    match method {
        Method::Gauss => Box::new(GaussSolver),
        Method::GaussJordan => Box::new(GaussJordanSolver),
        Method::Cramer => Box::new(CramerSolver),
    }
}
