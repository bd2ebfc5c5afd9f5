//! Dense matrix utilities: conversion from plain arrays, minors, column
//! replacement and determinants by cofactor expansion.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolveError};

/// Build a dense matrix from row vectors.
///
/// Rejects empty input and ragged rows.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if nrows == 0 || ncols == 0 {
        return Err(SolveError::ShapeMismatch(
            "matrix must have at least one row and one column".into(),
        ));
    }
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(SolveError::ShapeMismatch(
            "matrix rows have inconsistent lengths".into(),
        ));
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

pub fn vector_from_slice(values: &[f64]) -> DVector<f64> {
    DVector::from_column_slice(values)
}

/// Copy of `m` with row `row` and column `col` removed.
pub fn minor(m: &DMatrix<f64>, row: usize, col: usize) -> DMatrix<f64> {
    m.clone().remove_row(row).remove_column(col)
}

/// Copy of `m` with column `col` replaced by `v`.
///
/// # Panics
///
/// Panics if `v.len() != m.nrows()` or `col` is out of range.
pub fn replace_column(m: &DMatrix<f64>, col: usize, v: &DVector<f64>) -> DMatrix<f64> {
    let mut out = m.clone();
    out.set_column(col, v);
    out
}

/// Determinant by recursive cofactor expansion along the first row.
///
/// O(n!) time; see [`determinant_capped`] for a bounded variant.
pub fn determinant(m: &DMatrix<f64>) -> Result<f64> {
    if !m.is_square() {
        return Err(SolveError::ShapeMismatch(
            "determinant requires a square matrix".into(),
        ));
    }
    Ok(cofactor_determinant(m))
}

/// Like [`determinant`], but refuses orders above `limit`.
pub fn determinant_capped(m: &DMatrix<f64>, limit: Option<usize>) -> Result<f64> {
    if let Some(limit) = limit
        && m.nrows() > limit
    {
        return Err(SolveError::SizeLimitExceeded {
            order: m.nrows(),
            limit,
        });
    }
    determinant(m)
}

/// Caller guarantees `m` is square.
pub(crate) fn cofactor_determinant(m: &DMatrix<f64>) -> f64 {
    match m.nrows() {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * m[(0, j)] * cofactor_determinant(&minor(m, 0, j));
            }
            det
        }
    }
}
