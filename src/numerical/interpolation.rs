//! Newton interpolation on sampled data.
//!
//! Equally spaced samples use the forward-difference form
//! y(x0 + p h) = y0 + p Δy0 + p(p-1)/2! Δ²y0 + ... ,
//! arbitrary abscissas use divided differences.
use log::debug;
use nalgebra::DVector;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationError {
    NotEnoughPoints(usize),
    ZeroStep,
    /// sample `index` breaks the uniform spacing
    NonUniformSpacing { index: usize },
    DuplicateAbscissa { index: usize },
    /// fewer abscissas than coefficients
    LengthMismatch { coefficients: usize, abscissas: usize },
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterpolationError::NotEnoughPoints(n) => {
                write!(f, "At least 2 points are required, got {}", n)
            }
            InterpolationError::ZeroStep => write!(f, "Step between samples is zero"),
            InterpolationError::NonUniformSpacing { index } => {
                write!(f, "Samples are not equally spaced at index {}", index)
            }
            InterpolationError::DuplicateAbscissa { index } => {
                write!(f, "Duplicate x value at index {}", index)
            }
            InterpolationError::LengthMismatch {
                coefficients,
                abscissas,
            } => write!(
                f,
                "{} coefficients need at least as many x values, got {}",
                coefficients, abscissas
            ),
        }
    }
}

impl std::error::Error for InterpolationError {}

const SPACING_TOLERANCE: f64 = 1e-9;

/// Forward difference table. Row i holds [y_i, Δy_i, Δ²y_i, ...] and has n - i entries.
pub fn forward_difference_table(ys: &[f64]) -> Vec<Vec<f64>> {
    let n = ys.len();
    let mut table: Vec<Vec<f64>> = ys.iter().map(|&y| vec![y]).collect();
    for j in 1..n {
        for i in 0..n - j {
            let diff = table[i + 1][j - 1] - table[i][j - 1];
            table[i].push(diff);
        }
    }
    table
}

#[derive(Debug, Clone)]
pub struct ForwardInterpolation {
    pub value: f64,
    /// p = (x - x0) / h
    pub p: f64,
    pub step: f64,
    pub table: Vec<Vec<f64>>,
}

/// checks the samples and returns the step h
fn uniform_step(points: &[(f64, f64)]) -> Result<f64, InterpolationError> {
    if points.len() < 2 {
        return Err(InterpolationError::NotEnoughPoints(points.len()));
    }
    let h = points[1].0 - points[0].0;
    if h == 0.0 {
        return Err(InterpolationError::ZeroStep);
    }
    for (index, pair) in points.windows(2).enumerate().skip(1) {
        let step = pair[1].0 - pair[0].0;
        if (step - h).abs() > SPACING_TOLERANCE * h.abs().max(1.0) {
            return Err(InterpolationError::NonUniformSpacing { index: index + 1 });
        }
    }
    Ok(h)
}

/// Newton forward-difference interpolation at `x`
pub fn newton_forward_interpolate(
    points: &[(f64, f64)],
    x: f64,
) -> Result<ForwardInterpolation, InterpolationError> {
    let h = uniform_step(points)?;
    let p = (x - points[0].0) / h;
    let ys: Vec<f64> = points.iter().map(|pt| pt.1).collect();
    let table = forward_difference_table(&ys);

    let mut value = table[0][0];
    let mut p_product = 1.0;
    let mut factorial = 1.0;
    for k in 1..points.len() {
        p_product *= p - (k - 1) as f64;
        factorial *= k as f64;
        value += p_product / factorial * table[0][k];
    }
    debug!("forward interpolation at x = {} (p = {}): {}", x, p, value);
    Ok(ForwardInterpolation {
        value,
        p,
        step: h,
        table,
    })
}

/// First derivative of the Newton forward polynomial at `x`:
/// dy/dx = (1/h) sum_k [d/dp p(p-1)...(p-k+1)] / k! Δ^k y0.
/// At x = x0 this is the classic (Δy0 - Δ²y0/2 + Δ³y0/3 - ...) / h.
pub fn newton_forward_derivative(
    points: &[(f64, f64)],
    x: f64,
) -> Result<f64, InterpolationError> {
    let h = uniform_step(points)?;
    let p = (x - points[0].0) / h;
    let ys: Vec<f64> = points.iter().map(|pt| pt.1).collect();
    let table = forward_difference_table(&ys);

    // product P_k(p) = prod_{m<k} (p - m) and its derivative, updated by the product rule
    let mut product = 1.0;
    let mut d_product = 0.0;
    let mut factorial = 1.0;
    let mut derivative = 0.0;
    for k in 1..points.len() {
        let factor = p - (k - 1) as f64;
        d_product = d_product * factor + product;
        product *= factor;
        factorial *= k as f64;
        derivative += d_product / factorial * table[0][k];
    }
    Ok(derivative / h)
}

/// Compute Newton divided difference coefficients
pub fn newton_divided_differences(
    x_vals: &DVector<f64>,
    y_vals: &DVector<f64>,
) -> Result<DVector<f64>, InterpolationError> {
    let n = x_vals.len();
    if n < 2 || y_vals.len() != n {
        return Err(InterpolationError::NotEnoughPoints(n.min(y_vals.len())));
    }
    let mut coef = y_vals.clone();
    for j in 1..n {
        for i in (j..n).rev() {
            let dx = x_vals[i] - x_vals[i - j];
            if dx == 0.0 {
                return Err(InterpolationError::DuplicateAbscissa { index: i });
            }
            coef[i] = (coef[i] - coef[i - 1]) / dx;
        }
    }
    Ok(coef)
}

/// Evaluate Newton interpolating polynomial using Horner's method
pub fn newton_divided_interpolate(
    x: f64,
    x_vals: &DVector<f64>,
    coef: &DVector<f64>,
) -> Result<f64, InterpolationError> {
    let n = coef.len();
    if n == 0 {
        return Err(InterpolationError::NotEnoughPoints(0));
    }
    if x_vals.len() < n {
        return Err(InterpolationError::LengthMismatch {
            coefficients: n,
            abscissas: x_vals.len(),
        });
    }
    let mut result = coef[n - 1];
    for i in (0..n - 1).rev() {
        result = result * (x - x_vals[i]) + coef[i];
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_points() -> Vec<(f64, f64)> {
        vec![(0.0, 1.0), (1.0, 4.0), (2.0, 9.0), (3.0, 16.0)]
    }

    #[test]
    fn test_difference_table() {
        let table = forward_difference_table(&[1.0, 4.0, 9.0, 16.0]);
        assert_eq!(table[0], vec![1.0, 3.0, 2.0, 0.0]);
        assert_eq!(table[1], vec![4.0, 5.0, 2.0]);
        assert_eq!(table[2], vec![9.0, 7.0]);
        assert_eq!(table[3], vec![16.0]);
    }

    #[test]
    fn test_forward_interpolation_default() {
        // samples of (x + 1)^2
        let result = newton_forward_interpolate(&default_points(), 1.5).unwrap();
        assert_relative_eq!(result.value, 6.25, epsilon = 1e-12);
        assert_relative_eq!(result.p, 1.5);
        assert_relative_eq!(result.step, 1.0);
        assert_eq!(result.table.len(), 4);
    }

    #[test]
    fn test_forward_interpolation_reproduces_nodes() {
        let points = default_points();
        for &(x, y) in &points {
            let result = newton_forward_interpolate(&points, x).unwrap();
            assert_relative_eq!(result.value, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_forward_interpolation_cubic_non_unit_step() {
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;
        let points: Vec<(f64, f64)> = (0..5).map(|i| {
            let x = 0.5 + 0.25 * i as f64;
            (x, f(x))
        }).collect();
        let result = newton_forward_interpolate(&points, 0.9).unwrap();
        assert_relative_eq!(result.value, f(0.9), epsilon = 1e-12);
    }

    #[test]
    fn test_forward_derivative() {
        // y = (x + 1)^2, y' = 2(x + 1)
        let points = default_points();
        assert_relative_eq!(newton_forward_derivative(&points, 0.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(newton_forward_derivative(&points, 1.5).unwrap(), 5.0, epsilon = 1e-12);
        // sin is not a polynomial, the estimate only needs to be close
        let points: Vec<(f64, f64)> = (0..6).map(|i| {
            let x = 0.1 * i as f64;
            (x, x.sin())
        }).collect();
        assert_relative_eq!(newton_forward_derivative(&points, 0.0).unwrap(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_spacing_errors() {
        assert_eq!(
            newton_forward_interpolate(&[(0.0, 1.0)], 0.5).unwrap_err(),
            InterpolationError::NotEnoughPoints(1)
        );
        assert_eq!(
            newton_forward_interpolate(&[(1.0, 1.0), (1.0, 2.0)], 0.5).unwrap_err(),
            InterpolationError::ZeroStep
        );
        assert_eq!(
            newton_forward_interpolate(&[(0.0, 1.0), (1.0, 2.0), (3.0, 4.0)], 0.5).unwrap_err(),
            InterpolationError::NonUniformSpacing { index: 2 }
        );
    }

    #[test]
    fn test_divided_differences_uneven() {
        // f(x) = x^2 - 2x + 1 on uneven abscissas
        let x_vals = DVector::from_vec(vec![0.0, 0.5, 2.0, 3.5]);
        let y_vals = x_vals.map(|x| x * x - 2.0 * x + 1.0);
        let coef = newton_divided_differences(&x_vals, &y_vals).unwrap();
        assert_relative_eq!(coef[3], 0.0, epsilon = 1e-12);
        assert_relative_eq!(newton_divided_interpolate(1.5, &x_vals, &coef).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(newton_divided_interpolate(3.0, &x_vals, &coef).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_divided_differences_agree_with_forward() {
        let points = default_points();
        let x_vals = DVector::from_iterator(4, points.iter().map(|p| p.0));
        let y_vals = DVector::from_iterator(4, points.iter().map(|p| p.1));
        let coef = newton_divided_differences(&x_vals, &y_vals).unwrap();
        let forward = newton_forward_interpolate(&points, 2.2).unwrap().value;
        assert_relative_eq!(newton_divided_interpolate(2.2, &x_vals, &coef).unwrap(), forward, epsilon = 1e-12);
    }

    #[test]
    fn test_divided_differences_duplicate() {
        let x_vals = DVector::from_vec(vec![0.0, 1.0, 1.0]);
        let y_vals = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        assert!(matches!(
            newton_divided_differences(&x_vals, &y_vals),
            Err(InterpolationError::DuplicateAbscissa { .. })
        ));
    }

    #[test]
    fn test_divided_interpolate_checks_lengths() {
        let empty = DVector::<f64>::zeros(0);
        assert_eq!(
            newton_divided_interpolate(1.0, &empty, &empty),
            Err(InterpolationError::NotEnoughPoints(0))
        );
        let x_vals = DVector::from_vec(vec![0.0, 1.0]);
        let coef = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(
            newton_divided_interpolate(1.0, &x_vals, &coef),
            Err(InterpolationError::LengthMismatch {
                coefficients: 3,
                abscissas: 2
            })
        );
        let constant = DVector::from_vec(vec![7.0]);
        let node = DVector::from_vec(vec![5.0]);
        assert_eq!(newton_divided_interpolate(3.0, &node, &constant), Ok(7.0));
    }
}
