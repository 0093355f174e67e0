//! Row-major matrix built from a flat element sequence.
//!
//! Elements are opaque: the matrix only moves them around.

use crate::error::{MatrixError, MatrixResult};

/// A matrix stored as a sequence of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    pub(crate) rows: Vec<Vec<T>>,
}

impl<T> Matrix<T> {
    /// Wrap existing rows without checking their lengths
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row (0 for an empty matrix)
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Check that every row has exactly `expected` columns
    pub fn check_columns(&self, expected: usize) -> MatrixResult<()> {
        match self.rows.iter().position(|r| r.len() != expected) {
            None => Ok(()),
            Some(row) => Err(MatrixError::Ragged {
                row,
                expected,
                found: self.rows[row].len(),
            }),
        }
    }

    /// Check that the matrix is N x N
    pub fn check_square(&self) -> MatrixResult<()> {
        let n = self.row_count();
        self.check_columns(n).map_err(|_| MatrixError::NotSquare {
            rows: n,
            columns: self.column_count(),
        })
    }

    pub fn is_square(&self) -> bool {
        self.check_square().is_ok()
    }

    /// Concatenate the rows in row-major order
    pub fn into_flat(self) -> Vec<T> {
        self.rows.into_iter().flatten().collect()
    }
}

/// Partition `elements` into consecutive rows of `column_count` elements.
///
/// No padding or reordering: if `column_count` does not divide the length,
/// the last row is short. A zero `column_count` yields an empty matrix.
pub fn build<T: Clone>(elements: &[T], column_count: usize) -> Matrix<T> {
    if column_count == 0 {
        return Matrix::from_rows(Vec::new());
    }

    let rows = elements
        .chunks(column_count)
        .map(<[T]>::to_vec)
        .collect();

    Matrix::from_rows(rows)
}

/// Number of columns used for an array of `len` elements: `floor(sqrt(len))`
pub fn column_count_for(len: usize) -> usize {
    let mut root = (len as f64).sqrt() as usize;
    // Correct float rounding on large inputs
    while root > 0 && root.saturating_mul(root) > len {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= len {
        root += 1;
    }
    root
}
