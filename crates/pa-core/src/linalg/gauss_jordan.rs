//! Gauss-Jordan elimination with partial pivoting

use ndarray::{s, Array2, Axis};

use super::{LinalgError, Result};
use crate::{Matrix, Vector};

/// Relative pivot threshold
///
/// A pivot whose magnitude is at most `PIVOT_TOLERANCE` times the largest
/// absolute entry of the input matrix is treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Invert a square matrix
pub fn invert(matrix: &Matrix) -> Result<Matrix> {
    let n = check_square(matrix)?;
    let mut augmented = Array2::zeros((n, 2 * n));
    augmented.slice_mut(s![.., ..n]).assign(matrix);
    for i in 0..n {
        augmented[(i, n + i)] = 1.0;
    }

    reduce(&mut augmented, n)?;
    Ok(augmented.slice(s![.., n..]).to_owned())
}

/// Solve `A x = b` for square `A`
pub fn solve(matrix: &Matrix, rhs: &Vector) -> Result<Vector> {
    let n = check_square(matrix)?;
    if rhs.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            actual: rhs.len(),
        });
    }

    let mut augmented = Array2::zeros((n, n + 1));
    augmented.slice_mut(s![.., ..n]).assign(matrix);
    augmented.column_mut(n).assign(rhs);

    reduce(&mut augmented, n)?;
    Ok(augmented.column(n).to_owned())
}

fn check_square(matrix: &Matrix) -> Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(LinalgError::Empty);
    }
    Ok(rows)
}

/// Reduce the left `n` columns of `augmented` to the identity in place
fn reduce(augmented: &mut Matrix, n: usize) -> Result<()> {
    let scale = augmented
        .slice(s![.., ..n])
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let threshold = PIVOT_TOLERANCE * scale;

    for col in 0..n {
        // Partial pivoting: bring the largest remaining entry onto the diagonal
        let (pivot_row, pivot) = (col..n)
            .map(|r| (r, augmented[(r, col)]))
            .fold((col, 0.0_f64), |best, (r, v)| {
                if v.abs() > best.1.abs() {
                    (r, v)
                } else {
                    best
                }
            });

        if pivot.abs() <= threshold || scale == 0.0 {
            return Err(LinalgError::Singular { column: col, pivot });
        }

        if pivot_row != col {
            swap_rows(augmented, pivot_row, col);
        }

        augmented.row_mut(col).mapv_inplace(|v| v / pivot);
        let pivot_values = augmented.row(col).to_owned();

        for (r, mut row) in augmented.axis_iter_mut(Axis(0)).enumerate() {
            if r == col {
                continue;
            }
            let factor = row[col];
            if factor != 0.0 {
                row.scaled_add(-factor, &pivot_values);
            }
        }
    }

    Ok(())
}

fn swap_rows(matrix: &mut Matrix, a: usize, b: usize) {
    for c in 0..matrix.ncols() {
        matrix.swap((a, c), (b, c));
    }
}
