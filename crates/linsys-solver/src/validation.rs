//! Shape and input checks shared by every solver.
//!
//! Collaborators may call [`validate_shape`] / [`validate_square`] before
//! dispatching; the solvers re-run the same checks through [`check_system`]
//! so that a malformed system is always classified before any arithmetic.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolveError};

/// A non-empty matrix whose row count matches the vector length.
pub fn validate_shape(a: &DMatrix<f64>, b: &DVector<f64>) -> bool {
    a.nrows() > 0 && a.ncols() > 0 && a.nrows() == b.len()
}

/// A non-empty square matrix.
pub fn validate_square(a: &DMatrix<f64>) -> bool {
    a.nrows() > 0 && a.is_square()
}

pub fn check_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<()> {
    if a.nrows() == 0 || a.ncols() == 0 {
        return Err(SolveError::ShapeMismatch(
            "matrix must have at least one row and one column".into(),
        ));
    }
    if a.nrows() != b.len() {
        return Err(SolveError::dimension_mismatch());
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(SolveError::NonFiniteInput);
    }
    Ok(())
}

pub fn check_square_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<()> {
    if !validate_square(a) {
        return Err(SolveError::not_square());
    }
    check_system(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_requires_matching_rows() {
        let a = DMatrix::<f64>::zeros(2, 3);
        assert!(validate_shape(&a, &DVector::zeros(2)));
        assert!(!validate_shape(&a, &DVector::zeros(3)));
        assert!(!validate_shape(&DMatrix::zeros(0, 0), &DVector::zeros(0)));
    }

    #[test]
    fn square_check() {
        assert!(validate_square(&DMatrix::<f64>::zeros(3, 3)));
        assert!(!validate_square(&DMatrix::<f64>::zeros(2, 3)));
        assert!(!validate_square(&DMatrix::<f64>::zeros(0, 0)));
    }

    #[test]
    fn mismatched_vector_is_shape_error() {
        let a = DMatrix::<f64>::identity(2, 2);
        let err = check_system(&a, &DVector::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            SolveError::ShapeMismatch("dimension mismatch between matrix and vector".into())
        );
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        let mut a = DMatrix::<f64>::identity(2, 2);
        a[(1, 0)] = f64::NAN;
        assert_eq!(
            check_system(&a, &DVector::zeros(2)),
            Err(SolveError::NonFiniteInput)
        );

        let b = DVector::from_vec(vec![1.0, f64::INFINITY]);
        assert_eq!(
            check_system(&DMatrix::identity(2, 2), &b),
            Err(SolveError::NonFiniteInput)
        );
    }

    #[test]
    fn square_system_reports_square_violation_first() {
        let a = DMatrix::<f64>::zeros(2, 3);
        let err = check_square_system(&a, &DVector::zeros(2)).unwrap_err();
        assert_eq!(
            err,
            SolveError::ShapeMismatch("Cramer's rule requires a square matrix".into())
        );
    }
}
