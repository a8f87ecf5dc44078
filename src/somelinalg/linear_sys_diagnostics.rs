use itertools::Itertools;
use log::warn;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Errors shared by the iterative linear algebra routines
#[derive(Debug, Clone, PartialEq)]
pub enum LinearSystemError {
    NotSquare { rows: usize, cols: usize },
    DimensionMismatch { expected: usize, found: usize },
    /// zero on the main diagonal at the given row
    ZeroDiagonal(usize),
    ZeroTrace,
    Singular { determinant: f64 },
    NonFinite,
}

impl fmt::Display for LinearSystemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinearSystemError::NotSquare { rows, cols } => {
                write!(f, "Matrix must be square, got {}x{}", rows, cols)
            }
            LinearSystemError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
            LinearSystemError::ZeroDiagonal(i) => {
                write!(f, "Zero diagonal element in row {}", i)
            }
            LinearSystemError::ZeroTrace => write!(f, "Matrix trace is zero"),
            LinearSystemError::Singular { determinant } => {
                write!(f, "Matrix is singular. Determinant = {:.8}", determinant)
            }
            LinearSystemError::NonFinite => write!(f, "Matrix or vector contains NaN or infinity"),
        }
    }
}

impl std::error::Error for LinearSystemError {}

pub fn check_square(A: &DMatrix<f64>) -> Result<usize, LinearSystemError> {
    let (rows, cols) = A.shape();
    if rows != cols {
        return Err(LinearSystemError::NotSquare { rows, cols });
    }
    if A.iter().any(|a| !a.is_finite()) {
        return Err(LinearSystemError::NonFinite);
    }
    Ok(rows)
}

pub fn check_len(v: &DVector<f64>, expected: usize) -> Result<(), LinearSystemError> {
    if v.len() != expected {
        return Err(LinearSystemError::DimensionMismatch {
            expected,
            found: v.len(),
        });
    }
    if v.iter().any(|a| !a.is_finite()) {
        return Err(LinearSystemError::NonFinite);
    }
    Ok(())
}

/// Singular relative to the scale of A: the smallest singular value is at most
/// `epsilon` times the largest, so multiplying A by a constant does not change the answer.
pub fn is_singular(A: &DMatrix<f64>, epsilon: f64) -> bool {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    let is_singular = min_sigma <= epsilon * max_sigma;
    if is_singular {
        warn!(
            "Matrix is singular. Singular values range from {:.3e} to {:.3e}",
            min_sigma, max_sigma
        );
    }
    is_singular
}

/// condition number as the ratio of the largest to the smallest singular value
pub fn condition_number(A: &DMatrix<f64>) -> f64 {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    max_sigma / min_sigma
}

pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let condition_number = condition_number(A);
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The matrix is poorly conditioned. Condition number = {:.2}",
            condition_number
        );
    }
    poorly_conditioned
}

/// |a_ii| >= sum_{j != i} |a_ij| for every row (strict: >)
pub fn is_diagonally_dominant(A: &DMatrix<f64>, strict: bool) -> bool {
    A.row_iter().enumerate().all(|(i, row)| {
        let diag = row[i].abs();
        let off_diag: f64 = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, a)| a.abs())
            .sum();
        if strict {
            diag > off_diag
        } else {
            diag >= off_diag
        }
    })
}

/// Row order that makes the matrix strictly diagonally dominant, if one exists.
/// Returns the new row order (row `k` of the result is row `order[k]` of A).
/// A row can only be dominant in the column holding more than half of its absolute sum,
/// so each row has at most one place and the search is O(n^2).
pub fn diagonally_dominant_ordering(A: &DMatrix<f64>) -> Option<Vec<usize>> {
    let n = A.nrows();
    if n != A.ncols() {
        return None;
    }
    let columns: Vec<usize> = A
        .row_iter()
        .map(|row| {
            let abs: Vec<f64> = row.iter().map(|a| a.abs()).collect();
            let total: f64 = abs.iter().sum();
            let j = abs.iter().position_max_by(|a, b| a.total_cmp(b))?;
            (2.0 * abs[j] > total).then_some(j)
        })
        .collect::<Option<Vec<usize>>>()?;
    if !columns.iter().all_unique() {
        return None;
    }
    let mut order = vec![0; n];
    for (row, &col) in columns.iter().enumerate() {
        order[col] = row;
    }
    Some(order)
}
