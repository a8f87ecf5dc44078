//! Least-squares fitting of sampled (x, y) data.
use log::debug;
use nalgebra::{DMatrix, DVector};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FittingError {
    NotEnoughPoints { required: usize, found: usize },
    /// all x values coincide, the slope is undefined
    DegenerateAbscissa,
    SolveFailed(String),
}

impl fmt::Display for FittingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FittingError::NotEnoughPoints { required, found } => write!(
                f,
                "At least {} points are required for this fit, got {}",
                required, found
            ),
            FittingError::DegenerateAbscissa => {
                write!(f, "All x values are equal, the line is undefined")
            }
            FittingError::SolveFailed(msg) => write!(f, "Normal equations failed: {}", msg),
        }
    }
}

impl std::error::Error for FittingError {}

/// y = a x + b
#[derive(Debug, Clone)]
pub struct LineFit {
    /// slope
    pub a: f64,
    /// intercept
    pub b: f64,
    /// (x, a x + b) for every input point
    pub fitted: Vec<(f64, f64)>,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    pub fn residuals(&self, points: &[(f64, f64)]) -> Vec<f64> {
        points.iter().map(|&(x, y)| y - self.predict(x)).collect()
    }

    /// coefficient of determination, 1 - SS_res / SS_tot
    pub fn r_squared(&self, points: &[(f64, f64)]) -> f64 {
        r_squared(points, |x| self.predict(x))
    }
}

pub fn least_squares_line(points: &[(f64, f64)]) -> Result<LineFit, FittingError> {
    if points.len() < 2 {
        return Err(FittingError::NotEnoughPoints {
            required: 2,
            found: points.len(),
        });
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();
    let sum_x2: f64 = points.iter().map(|p| p.0 * p.0).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON * n * sum_x2.max(1.0) {
        return Err(FittingError::DegenerateAbscissa);
    }
    let a = (n * sum_xy - sum_x * sum_y) / denominator;
    let b = (sum_y - a * sum_x) / n;
    debug!("least squares line: y = {} x + {}", a, b);
    let fitted = points.iter().map(|&(x, _)| (x, a * x + b)).collect();
    Ok(LineFit { a, b, fitted })
}

/// y = c_0 + c_1 x + ... + c_d x^d
#[derive(Debug, Clone)]
pub struct PolynomialFit {
    /// lowest order first
    pub coefficients: DVector<f64>,
}

impl PolynomialFit {
    /// Horner evaluation
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn r_squared(&self, points: &[(f64, f64)]) -> f64 {
        r_squared(points, |x| self.predict(x))
    }
}

/// Polynomial least squares through the normal equations (V^T V) c = V^T y,
/// V being the Vandermonde matrix of the abscissas. Solved by SVD so that a
/// rank-deficient system is reported instead of producing garbage.
pub fn least_squares_polynomial(
    points: &[(f64, f64)],
    degree: usize,
) -> Result<PolynomialFit, FittingError> {
    let m = degree + 1;
    if points.len() < m {
        return Err(FittingError::NotEnoughPoints {
            required: m,
            found: points.len(),
        });
    }
    let V = DMatrix::from_fn(points.len(), m, |i, j| points[i].0.powi(j as i32));
    let y = DVector::from_iterator(points.len(), points.iter().map(|p| p.1));
    let VtV = V.transpose() * &V;
    let Vty = V.transpose() * y;
    let svd = VtV.svd(true, true);
    let rank = svd.rank(1e-12 * svd.singular_values.max());
    if rank < m {
        return Err(FittingError::DegenerateAbscissa);
    }
    let coefficients = svd
        .solve(&Vty, 1e-14)
        .map_err(|e| FittingError::SolveFailed(e.to_string()))?;
    Ok(PolynomialFit { coefficients })
}

fn r_squared<F: Fn(f64) -> f64>(points: &[(f64, f64)], model: F) -> f64 {
    let n = points.len() as f64;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let ss_tot: f64 = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
    let ss_res: f64 = points.iter().map(|&(x, y)| (y - model(x)).powi(2)).sum();
    if ss_tot == 0.0 {
        // constant data: a perfect fit or nothing
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_points() -> Vec<(f64, f64)> {
        vec![(1.0, 5.0), (2.0, 8.0), (3.0, 12.0), (4.0, 15.0), (5.0, 20.0)]
    }

    #[test]
    fn test_line_default_points() {
        let fit = least_squares_line(&default_points()).unwrap();
        // n = 5, sum_x = 15, sum_y = 60, sum_xy = 217, sum_x2 = 55
        assert_relative_eq!(fit.a, 3.7, epsilon = 1e-12);
        assert_relative_eq!(fit.b, 0.9, epsilon = 1e-12);
        assert_eq!(fit.fitted.len(), 5);
        assert_relative_eq!(fit.fitted[0].1, 4.6, epsilon = 1e-12);
        assert!(fit.r_squared(&default_points()) > 0.99);
        let residual_sum: f64 = fit.residuals(&default_points()).iter().sum();
        assert_relative_eq!(residual_sum, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_exact_data() {
        let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 2.0 * i as f64 - 1.0)).collect();
        let fit = least_squares_line(&points).unwrap();
        assert_relative_eq!(fit.a, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.b, -1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared(&points), 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 19.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_errors() {
        assert_eq!(
            least_squares_line(&[(1.0, 2.0)]).unwrap_err(),
            FittingError::NotEnoughPoints {
                required: 2,
                found: 1
            }
        );
        assert_eq!(
            least_squares_line(&[(1.0, 2.0), (1.0, 3.0), (1.0, 4.0)]).unwrap_err(),
            FittingError::DegenerateAbscissa
        );
    }

    #[test]
    fn test_polynomial_recovers_quadratic() {
        let points: Vec<(f64, f64)> = (0..8)
            .map(|i| {
                let x = i as f64 * 0.5;
                (x, 1.0 - 2.0 * x + 0.5 * x * x)
            })
            .collect();
        let fit = least_squares_polynomial(&points, 2).unwrap();
        assert_eq!(fit.degree(), 2);
        assert_relative_eq!(fit.coefficients[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(fit.coefficients[1], -2.0, epsilon = 1e-8);
        assert_relative_eq!(fit.coefficients[2], 0.5, epsilon = 1e-8);
        assert_relative_eq!(fit.r_squared(&points), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_degree_one_matches_line() {
        let points = default_points();
        let line = least_squares_line(&points).unwrap();
        let poly = least_squares_polynomial(&points, 1).unwrap();
        assert_relative_eq!(poly.coefficients[0], line.b, epsilon = 1e-9);
        assert_relative_eq!(poly.coefficients[1], line.a, epsilon = 1e-9);
    }

    #[test]
    fn test_polynomial_not_enough_points() {
        let result = least_squares_polynomial(&[(0.0, 1.0), (1.0, 2.0)], 2);
        assert!(matches!(
            result,
            Err(FittingError::NotEnoughPoints { required: 3, found: 2 })
        ));
    }
}
