//! Jacobi iteration for linear systems A x = b.
//!
//! Every sweep computes the whole new vector from the previous one:
//! x_new[i] = (b[i] - sum_{j != i} A[i][j] x[j]) / A[i][i].
//! Iteration stops when the max-norm of the update falls below the tolerance.
use crate::somelinalg::linear_sys_diagnostics::{
    LinearSystemError, check_len, check_square, diagonally_dominant_ordering,
    is_diagonally_dominant,
};
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone)]
pub struct JacobiResult {
    pub solution: DVector<f64>,
    /// 0-based index of the sweep that met the tolerance
    pub iterations: usize,
    pub converged: bool,
    /// max-norm of the last update
    pub error: f64,
    /// (sweep index, vector after the sweep)
    pub history: Vec<(usize, DVector<f64>)>,
}

pub struct JacobiSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for JacobiSolver {
    fn default() -> Self {
        JacobiSolver {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl JacobiSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        JacobiSolver {
            tolerance,
            max_iterations,
        }
    }

    pub fn solve(
        &self,
        A: &DMatrix<f64>,
        b: &DVector<f64>,
        x0: &DVector<f64>,
    ) -> Result<JacobiResult, LinearSystemError> {
        let n = check_square(A)?;
        check_len(b, n)?;
        check_len(x0, n)?;
        if let Some(i) = (0..n).find(|&i| A[(i, i)] == 0.0) {
            return Err(LinearSystemError::ZeroDiagonal(i));
        }
        if !is_diagonally_dominant(A, false) {
            warn!("Matrix is not diagonally dominant, Jacobi iteration may diverge");
        }

        let mut x = x0.clone();
        let mut history = Vec::new();
        let mut error = f64::INFINITY;
        for iter in 0..self.max_iterations {
            let x_new = Self::sweep(A, b, &x);
            error = (&x_new - &x).amax();
            history.push((iter, x_new.clone()));
            debug!("sweep {}: x = {:?}, error = {:.3e}", iter, x_new.as_slice(), error);
            if error < self.tolerance {
                info!("Jacobi converged in {} sweeps, error = {:.3e}", iter + 1, error);
                return Ok(JacobiResult {
                    solution: x_new,
                    iterations: iter,
                    converged: true,
                    error,
                    history,
                });
            }
            x = x_new;
        }
        warn!(
            "Jacobi: maximum number of iterations ({}) reached, error = {:.3e}",
            self.max_iterations, error
        );
        Ok(JacobiResult {
            solution: x,
            iterations: self.max_iterations,
            converged: false,
            error,
            history,
        })
    }

    /// Reorder the equations into a strictly diagonally dominant system when such an
    /// ordering exists, then solve. Falls back to the given order otherwise.
    pub fn solve_reordered(
        &self,
        A: &DMatrix<f64>,
        b: &DVector<f64>,
        x0: &DVector<f64>,
    ) -> Result<JacobiResult, LinearSystemError> {
        check_square(A)?;
        match diagonally_dominant_ordering(A) {
            Some(order) => {
                info!("Equations reordered for diagonal dominance: {:?}", order);
                let A_ordered = A.select_rows(order.iter());
                check_len(b, A.nrows())?;
                let b_ordered = b.select_rows(order.iter());
                self.solve(&A_ordered, &b_ordered, x0)
            }
            None => self.solve(A, b, x0),
        }
    }

    fn sweep(A: &DMatrix<f64>, b: &DVector<f64>, x: &DVector<f64>) -> DVector<f64> {
        let n = b.len();
        DVector::from_fn(n, |i, _| {
            let mut sum = b[i];
            for j in 0..n {
                if i != j {
                    sum -= A[(i, j)] * x[j];
                }
            }
            sum / A[(i, i)]
        })
    }
}
