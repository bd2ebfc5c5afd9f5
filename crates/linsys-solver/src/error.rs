//! Failure classification for the solvers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("inconsistent system: no solution exists (rank {rank})")]
    InconsistentSystem { rank: usize },

    #[error("infinitely many solutions: rank {rank} < {unknowns} unknowns")]
    InfiniteSolutions { rank: usize, unknowns: usize },

    #[error("singular matrix: determinant {determinant:e} is numerically zero")]
    SingularMatrix { determinant: f64 },

    #[error("matrix order {order} exceeds the cofactor expansion limit of {limit}")]
    SizeLimitExceeded { order: usize, limit: usize },

    #[error("numerical overflow: {0} is not finite")]
    NumericalOverflow(String),

    #[error("matrix or vector contains NaN or infinite entries")]
    NonFiniteInput,

    #[error("invalid solver policy: {0}")]
    InvalidPolicy(String),
}

impl SolveError {
    pub(crate) fn dimension_mismatch() -> Self {
        SolveError::ShapeMismatch("dimension mismatch between matrix and vector".into())
    }

    pub(crate) fn not_square() -> Self {
        SolveError::ShapeMismatch("Cramer's rule requires a square matrix".into())
    }

    /// Tag used in execution reports.
    pub fn kind(&self) -> FailureKind {
        match self {
            SolveError::ShapeMismatch(_) => FailureKind::ShapeMismatch,
            SolveError::NumericalOverflow(_) => FailureKind::NumericalOverflow,
            SolveError::NonFiniteInput => FailureKind::InvalidInput,
            SolveError::InconsistentSystem { .. } => FailureKind::InconsistentSystem,
            SolveError::InfiniteSolutions { .. } => FailureKind::InfiniteSolutions,
            SolveError::SingularMatrix { .. } => FailureKind::SingularMatrix,
            SolveError::SizeLimitExceeded { .. } => FailureKind::SizeLimitExceeded,
            SolveError::InvalidPolicy(_) => FailureKind::InvalidPolicy,
        }
    }

    /// Rank detected before the failure, when elimination got that far.
    pub fn rank(&self) -> Option<usize> {
        match self {
            SolveError::InconsistentSystem { rank } => Some(*rank),
            SolveError::InfiniteSolutions { rank, .. } => Some(*rank),
            _ => None,
        }
    }
}

/// Serializable failure tag carried by report entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    ShapeMismatch,
    InconsistentSystem,
    InfiniteSolutions,
    SingularMatrix,
    SizeLimitExceeded,
    NumericalOverflow,
    InvalidInput,
    InvalidPolicy,
    /// The solver panicked; the report detail holds the panic message.
    Internal,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::ShapeMismatch => "SHAPE_MISMATCH",
            FailureKind::InconsistentSystem => "INCONSISTENT",
            FailureKind::InfiniteSolutions => "INFINITE_SOLUTIONS",
            FailureKind::SingularMatrix => "SINGULAR",
            FailureKind::SizeLimitExceeded => "SIZE_LIMIT",
            FailureKind::NumericalOverflow => "OVERFLOW",
            FailureKind::InvalidInput => "INVALID_INPUT",
            FailureKind::InvalidPolicy => "INVALID_POLICY",
            FailureKind::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
