//! Layer rotation.
//!
//! Peels the matrix into concentric square rings, outermost first, and
//! shifts every element of each ring one position clockwise. A single
//! carried value travels around the ring; no second buffer is allocated.
//!
//! The carried value is seeded from the cell just below the ring's
//! top-left corner, then the ring is swept in this order:
//!
//! ```text
//!   top row      left  -> right
//!   right column top   -> bottom
//!   bottom row   right -> left
//!   left column  bottom -> top
//! ```
//!
//! Output compatibility depends on this exact seed and order.

use std::mem;

use super::matrix::Matrix;
use crate::error::MatrixResult;

/// Rotate every ring of a square matrix by one position and return it.
///
/// Matrices of size 0 or 1 are returned unchanged. A non-square matrix is
/// rejected with [`crate::error::MatrixError::NotSquare`].
pub fn rotate<T: Clone>(mut matrix: Matrix<T>) -> MatrixResult<Matrix<T>> {
    rotate_in_place(&mut matrix)?;
    Ok(matrix)
}

/// In-place form of [`rotate`].
pub fn rotate_in_place<T: Clone>(matrix: &mut Matrix<T>) -> MatrixResult<()> {
    matrix.check_square()?;

    let n = matrix.row_count();
    if n < 2 {
        return Ok(());
    }

    let rows = &mut matrix.rows;
    let mut top = 0;
    let mut bottom = n - 1;
    let mut left = 0;
    let mut right = n - 1;

    while left < right && top < bottom {
        let mut carried = rows[top + 1][left].clone();

        for column in left..=right {
            carried = mem::replace(&mut rows[top][column], carried);
        }
        top += 1;

        for row in top..=bottom {
            carried = mem::replace(&mut rows[row][right], carried);
        }
        right -= 1;

        for column in (left..=right).rev() {
            carried = mem::replace(&mut rows[bottom][column], carried);
        }
        bottom -= 1;

        // Empty once the ring is only two rows tall
        for row in (top..=bottom).rev() {
            carried = mem::replace(&mut rows[row][left], carried);
        }
        left += 1;
    }

    Ok(())
}
