//! numerical methods of the tasks
/// Newton-Raphson, bisection, secant and false position methods for f(x) = 0
///  Example
/// ```
/// use CompMathTasks::numerical::root_finding::newton_raphson;
/// let root = newton_raphson(|x: f64| x.cos() - x, |x: f64| -x.sin() - 1.0, 0.5, 1e-6).unwrap();
/// assert!((root - 0.739085).abs() < 1e-6);
/// ```
pub mod root_finding;
/// Jacobi iteration for linear systems
pub mod jacobi;
/// least squares line and polynomial fits
pub mod curve_fitting;
/// Newton forward difference and divided difference interpolation
pub mod interpolation;
/// third order Taylor series method for y' = f(x, y)
pub mod taylor_series;
/// trapezoidal and Simpson rules, Gauss-Legendre reference
pub mod quadrature;
