//! Augmented-matrix builder: `[A | b]` as a private working buffer.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolveError};

/// Owned n×(m+1) working copy of a system, column `m` holding `b`.
///
/// Each solve builds its own buffer; the caller's `A` and `b` are never
/// aliased or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix {
    data: DMatrix<f64>,
    unknowns: usize,
}

impl AugmentedMatrix {
    pub fn build(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<Self> {
        if a.nrows() != b.len() {
            return Err(SolveError::dimension_mismatch());
        }
        let (n, m) = a.shape();
        let mut data = DMatrix::zeros(n, m + 1);
        data.view_mut((0, 0), (n, m)).copy_from(a);
        data.set_column(m, b);
        Ok(Self { data, unknowns: m })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of coefficient columns (unknowns).
    pub fn unknowns(&self) -> usize {
        self.unknowns
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.data[(row, self.unknowns)]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            self.data.swap_rows(a, b);
        }
    }

    /// Divide the whole row, constant column included, by `divisor`.
    pub fn scale_row(&mut self, row: usize, divisor: f64) {
        let mut r = self.data.row_mut(row);
        r /= divisor;
    }

    /// `target -= factor * source` across every column.
    pub fn subtract_row(&mut self, target: usize, source: usize, factor: f64) {
        for col in 0..self.data.ncols() {
            let delta = factor * self.data[(source, col)];
            self.data[(target, col)] -= delta;
        }
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_vector_as_last_column() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = DVector::from_vec(vec![7.0, 8.0]);
        let aug = AugmentedMatrix::build(&a, &b).unwrap();

        assert_eq!(aug.as_matrix().shape(), (2, 4));
        assert_eq!(aug.unknowns(), 3);
        assert_eq!(aug.rhs(0), 7.0);
        assert_eq!(aug.rhs(1), 8.0);
        assert_eq!(aug.get(1, 2), 6.0);
    }

    #[test]
    fn working_copy_does_not_alias_input() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 5.0]);
        let mut aug = AugmentedMatrix::build(&a, &b).unwrap();
        aug.scale_row(0, 2.0);
        aug.swap_rows(0, 1);

        assert_eq!(a[(0, 0)], 2.0);
        assert_eq!(b[0], 3.0);
        assert_eq!(aug.get(1, 0), 1.0);
        assert_eq!(aug.rhs(1), 1.5);
    }

    #[test]
    fn rejects_length_mismatch() {
        let a = DMatrix::<f64>::identity(3, 3);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            AugmentedMatrix::build(&a, &b),
            Err(SolveError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn subtract_row_includes_constant_column() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DVector::from_vec(vec![5.0, 6.0]);
        let mut aug = AugmentedMatrix::build(&a, &b).unwrap();
        aug.subtract_row(1, 0, 3.0);
        assert_eq!(aug.get(1, 0), 0.0);
        assert_eq!(aug.get(1, 1), -2.0);
        assert_eq!(aug.rhs(1), -9.0);
    }
}
