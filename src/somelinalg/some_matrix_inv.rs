use crate::somelinalg::linear_sys_diagnostics::{LinearSystemError, check_square, is_singular};
use log::{debug, info, warn};
use nalgebra::DMatrix;
#[derive(Debug, Clone)]
pub struct InversionResult {
    pub inverse: DMatrix<f64>,
    /// 0-based index of the iteration that met the tolerance
    pub iterations: usize,
    pub converged: bool,
    /// (iteration, max elementwise change)
    pub history: Vec<(usize, f64)>,
}

/// Iterative matrix inversion (Newton–Schulz / Hotelling–Bodewig):
/// X_{k+1} = X_k (2I - A X_k), started from X_0 = I / trace(A).
/// The start is contractive for symmetric positive definite matrices, where every
/// eigenvalue of A / trace(A) lies in (0, 1).
///  Example
/// ```
/// use CompMathTasks::somelinalg::some_matrix_inv::IterativeInverse;
/// use nalgebra::DMatrix;
/// let A = DMatrix::from_row_slice(3, 3, &[5.0, -3.0, 2.0, -3.0, 9.0, -1.0, 2.0, -1.0, 7.0]);
/// let result = IterativeInverse::default().invert(&A).unwrap();
/// assert!(result.converged);
/// ```
pub struct IterativeInverse {
    pub tolerance: f64,
    pub max_iterations: usize,
    /// smallest to largest singular value ratio below which the matrix is rejected as singular
    pub singularity_threshold: f64,
}

impl Default for IterativeInverse {
    fn default() -> Self {
        IterativeInverse {
            tolerance: 1e-6,
            max_iterations: 100,
            singularity_threshold: 1e-12,
        }
    }
}

impl IterativeInverse {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        IterativeInverse {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }

    pub fn invert(&self, A: &DMatrix<f64>) -> Result<InversionResult, LinearSystemError> {
        let n = check_square(A)?;
        let trace = A.trace();
        if trace == 0.0 {
            return Err(LinearSystemError::ZeroTrace);
        }
        if is_singular(A, self.singularity_threshold) {
            return Err(LinearSystemError::Singular {
                determinant: A.determinant(),
            });
        }
        let two_I: DMatrix<f64> = DMatrix::identity(n, n) * 2.0;
        let mut X: DMatrix<f64> = DMatrix::identity(n, n) / trace;
        let mut history = Vec::new();
        for iter in 0..self.max_iterations {
            let AX = A * &X;
            let X_new = &X * (&two_I - AX);
            let error = (&X_new - &X).amax();
            history.push((iter, error));
            debug!("iteration {}: error = {:.3e}", iter, error);
            if error < self.tolerance {
                info!("inverse converged in {} iterations", iter + 1);
                return Ok(InversionResult {
                    inverse: X_new,
                    iterations: iter,
                    converged: true,
                    history,
                });
            }
            X = X_new;
        }
        warn!(
            "Iterative inversion: maximum number of iterations ({}) reached",
            self.max_iterations
        );
        Ok(InversionResult {
            inverse: X,
            iterations: self.max_iterations,
            converged: false,
            history,
        })
    }
}

/// max |A X - I|, how far X is from being the inverse of A
pub fn residual(A: &DMatrix<f64>, X: &DMatrix<f64>) -> f64 {
    let n = A.nrows();
    (A * X - DMatrix::<f64>::identity(n, n)).amax()
}
