//! Scalar root finding: Newton-Raphson, bisection, secant and false position.
//!
//! Example
//! ```
//! use CompMathTasks::numerical::root_finding::{FunctionWithDerivative, ScalarRootFinder};
//! let f = FunctionWithDerivative::new(|x: f64| x.cos() - x, |x: f64| -x.sin() - 1.0, "cos(x) - x".to_string());
//! let solver = ScalarRootFinder::new();
//! let result = solver.newton_raphson(&f, 0.5).unwrap();
//! assert!((result.root - 0.739085).abs() < 1e-6);
//! ```
use log::{debug, warn};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Enum to represent the root finding methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum RootFindingMethod {
    #[strum(to_string = "newton", serialize = "newton_raphson")]
    NewtonRaphson,
    #[strum(serialize = "bisection")]
    Bisection,
    #[strum(serialize = "secant")]
    Secant,
    #[strum(to_string = "false_position", serialize = "regula_falsi")]
    FalsePosition,
}

impl RootFindingMethod {
    /// bracketing methods need a sign change on [a, b]
    pub fn is_bracketing(&self) -> bool {
        matches!(
            self,
            RootFindingMethod::Bisection | RootFindingMethod::FalsePosition
        )
    }
}

/// Error types for root finding methods
#[derive(Debug, Clone, PartialEq)]
pub enum RootFindingError {
    /// f(a) and f(b) have the same sign, so the interval brackets no root
    InvalidInterval,
    DerivativeZero,
    InvalidInput(String),
}

impl fmt::Display for RootFindingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RootFindingError::InvalidInterval => {
                write!(f, "No sign change in the interval: no root can be bracketed")
            }
            RootFindingError::DerivativeZero => write!(f, "Derivative is zero"),
            RootFindingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for RootFindingError {}
//////////////////////////////////TRAITS AND IMPLEMENTATIONS/////////////////////////////////
/// Trait for representing a nonlinear equation f(x) = 0
pub trait NonlinearFunction {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the derivative at point x (optional, for methods that can use it)
    fn derivative(&self, _x: f64) -> Option<f64> {
        None
    }

    /// Get function name for logging
    fn name(&self) -> &str {
        "unnamed_function"
    }
}

/// Simple function wrapper for closures
pub struct ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: String) -> Self {
        Self { func, name }
    }
}

impl<F> NonlinearFunction for ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Function wrapper with analytical derivative
pub struct FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    func: F,
    derivative_func: D,
    name: String,
}

impl<F, D> FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    pub fn new(func: F, derivative_func: D, name: String) -> Self {
        Self {
            func,
            derivative_func,
            name,
        }
    }
}

impl<F, D> NonlinearFunction for FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.derivative_func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

///////////////////////////////////////////SETTERS AND GETTERS///////////////////////////////////////////
/// Result structure for root finding methods
#[derive(Debug, Clone)]
pub struct RootFindingResult {
    pub root: f64,
    pub function_value: f64,
    /// number of completed updates before the convergence test passed
    pub iterations: usize,
    pub converged: bool,
    pub method: RootFindingMethod,
    /// every iterate visited, in order
    pub history: Vec<f64>,
}

/// Configuration for root finding methods
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for RootFindingConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

const TINY: f64 = 1e-15;
const NUMERICAL_DIFF_STEP: f64 = 1e-8;

/// Main structure for scalar root finding methods
pub struct ScalarRootFinder {
    config: RootFindingConfig,
}

impl ScalarRootFinder {
    /// Create a new ScalarRootFinder with default configuration
    pub fn new() -> Self {
        Self {
            config: RootFindingConfig::default(),
        }
    }

    /// Create a new ScalarRootFinder with custom configuration
    pub fn with_config(config: RootFindingConfig) -> Self {
        Self { config }
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.config.tolerance = tolerance;
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.config.max_iterations = max_iterations;
    }

    pub fn config(&self) -> &RootFindingConfig {
        &self.config
    }

    /// Solve with specific method.
    /// Bracketing methods take their interval from `search_range`; the secant method uses
    /// the range endpoints as its two starting points when a range is given.
    pub fn solve_with_method<F>(
        &self,
        function: &F,
        method: RootFindingMethod,
        initial_guess: f64,
        search_range: Option<(f64, f64)>,
    ) -> Result<RootFindingResult, RootFindingError>
    where
        F: NonlinearFunction,
    {
        match method {
            RootFindingMethod::Bisection | RootFindingMethod::FalsePosition => {
                let Some((a, b)) = search_range else {
                    return Err(RootFindingError::InvalidInput(format!(
                        "{} method requires search range",
                        method
                    )));
                };
                if method == RootFindingMethod::Bisection {
                    self.bisection(function, a, b)
                } else {
                    self.false_position(function, a, b)
                }
            }
            RootFindingMethod::Secant => {
                let (x0, x1) = match search_range {
                    Some((a, b)) => (a, b),
                    None => (
                        initial_guess,
                        initial_guess + 0.01 * initial_guess.abs().max(1.0),
                    ),
                };
                self.secant(function, x0, x1)
            }
            RootFindingMethod::NewtonRaphson => self.newton_raphson(function, initial_guess),
        }
    }

    /////////////////////////////////////////METHODS///////////////////////////////////////////

    /// Newton-Raphson method: x <- x - f(x)/f'(x).
    /// Uses the analytical derivative when the function provides one, central difference otherwise.
    pub fn newton_raphson<F>(&self, function: &F, mut x: f64) -> Result<RootFindingResult, RootFindingError>
    where
        F: NonlinearFunction,
    {
        check_finite(&[x])?;
        debug!(
            "Newton-Raphson method for {}, initial guess {}",
            function.name(),
            x
        );
        let mut history = vec![x];
        for i in 0..self.config.max_iterations {
            let fx = function.evaluate(x);
            if fx.abs() < self.config.tolerance {
                return Ok(RootFindingResult {
                    root: x,
                    function_value: fx,
                    iterations: i,
                    converged: true,
                    method: RootFindingMethod::NewtonRaphson,
                    history,
                });
            }
            let fpx = match function.derivative(x) {
                Some(deriv) => deriv,
                None => {
                    let h = NUMERICAL_DIFF_STEP;
                    (function.evaluate(x + h) - function.evaluate(x - h)) / (2.0 * h)
                }
            };
            if fpx.abs() < TINY {
                return Err(RootFindingError::DerivativeZero);
            }
            x -= fx / fpx;
            debug!("iteration {}: x = {:.10}, f(x) = {:.2e}", i + 1, x, fx);
            history.push(x);
        }
        Ok(self.not_converged(function, x, RootFindingMethod::NewtonRaphson, history))
    }

    /// Bisection method. Requires that f(a) and f(b) have opposite signs
    pub fn bisection<F>(
        &self,
        function: &F,
        mut a: f64,
        mut b: f64,
    ) -> Result<RootFindingResult, RootFindingError>
    where
        F: NonlinearFunction,
    {
        check_finite(&[a, b])?;
        let mut fa = function.evaluate(a);
        let fb = function.evaluate(b);
        if fa * fb > 0.0 {
            return Err(RootFindingError::InvalidInterval);
        }
        debug!(
            "Bisection method for {} on [{}, {}]",
            function.name(),
            a,
            b
        );
        let mut history = Vec::new();
        for i in 0..self.config.max_iterations {
            let c = (a + b) / 2.0;
            let fc = function.evaluate(c);
            history.push(c);
            if fc.abs() < self.config.tolerance {
                return Ok(RootFindingResult {
                    root: c,
                    function_value: fc,
                    iterations: i,
                    converged: true,
                    method: RootFindingMethod::Bisection,
                    history,
                });
            }
            if fa * fc < 0.0 {
                b = c;
            } else {
                a = c;
                fa = fc;
            }
            debug!("iteration {}: interval = [{:.10}, {:.10}]", i + 1, a, b);
        }
        Ok(self.not_converged(
            function,
            (a + b) / 2.0,
            RootFindingMethod::Bisection,
            history,
        ))
    }

    /// Secant method. Requires two initial guesses x0 and x1
    pub fn secant<F>(
        &self,
        function: &F,
        mut x0: f64,
        mut x1: f64,
    ) -> Result<RootFindingResult, RootFindingError>
    where
        F: NonlinearFunction,
    {
        check_finite(&[x0, x1])?;
        debug!(
            "Secant method for {}, initial guesses {}, {}",
            function.name(),
            x0,
            x1
        );
        let mut f0 = function.evaluate(x0);
        let mut history = vec![x0, x1];
        for i in 0..self.config.max_iterations {
            let f1 = function.evaluate(x1);
            if f1.abs() < self.config.tolerance {
                return Ok(RootFindingResult {
                    root: x1,
                    function_value: f1,
                    iterations: i,
                    converged: true,
                    method: RootFindingMethod::Secant,
                    history,
                });
            }
            if (f1 - f0).abs() < TINY {
                return Err(RootFindingError::DerivativeZero);
            }
            let x2 = x1 - f1 * (x1 - x0) / (f1 - f0);
            debug!("iteration {}: x = {:.10}, f(x) = {:.2e}", i + 1, x2, f1);
            x0 = x1;
            f0 = f1;
            x1 = x2;
            history.push(x2);
        }
        Ok(self.not_converged(function, x1, RootFindingMethod::Secant, history))
    }

    /// False position (regula falsi): bisection with the midpoint replaced by the
    /// root of the chord through (a, f(a)) and (b, f(b))
    pub fn false_position<F>(
        &self,
        function: &F,
        mut a: f64,
        mut b: f64,
    ) -> Result<RootFindingResult, RootFindingError>
    where
        F: NonlinearFunction,
    {
        check_finite(&[a, b])?;
        let mut fa = function.evaluate(a);
        let mut fb = function.evaluate(b);
        if fa * fb > 0.0 {
            return Err(RootFindingError::InvalidInterval);
        }
        debug!(
            "False position method for {} on [{}, {}]",
            function.name(),
            a,
            b
        );
        let mut history = Vec::new();
        let mut c = a;
        for i in 0..self.config.max_iterations {
            if (fb - fa).abs() < TINY {
                return Err(RootFindingError::DerivativeZero);
            }
            c = (a * fb - b * fa) / (fb - fa);
            let fc = function.evaluate(c);
            history.push(c);
            if fc.abs() < self.config.tolerance {
                return Ok(RootFindingResult {
                    root: c,
                    function_value: fc,
                    iterations: i,
                    converged: true,
                    method: RootFindingMethod::FalsePosition,
                    history,
                });
            }
            if fa * fc < 0.0 {
                b = c;
                fb = fc;
            } else {
                a = c;
                fa = fc;
            }
        }
        Ok(self.not_converged(function, c, RootFindingMethod::FalsePosition, history))
    }

    fn not_converged<F>(
        &self,
        function: &F,
        x: f64,
        method: RootFindingMethod,
        history: Vec<f64>,
    ) -> RootFindingResult
    where
        F: NonlinearFunction,
    {
        warn!(
            "{}: maximum number of iterations ({}) reached for {}, returning last estimate {}",
            method,
            self.config.max_iterations,
            function.name(),
            x
        );
        RootFindingResult {
            root: x,
            function_value: function.evaluate(x),
            iterations: self.config.max_iterations,
            converged: false,
            method,
            history,
        }
    }
}

impl Default for ScalarRootFinder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite(values: &[f64]) -> Result<(), RootFindingError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RootFindingError::InvalidInput(format!(
            "starting points must be finite, got {:?}",
            values
        )))
    }
}

/// |approx - reference|
pub fn absolute_error(approx: f64, reference: f64) -> f64 {
    (approx - reference).abs()
}

/// |(approx - exact) / exact| in percent
pub fn relative_error_percent(approx: f64, exact: f64) -> f64 {
    ((approx - exact) / exact).abs() * 100.0
}

// Convenience functions for quick usage
pub fn bisection<F>(function: F, a: f64, b: f64, tolerance: f64) -> Result<f64, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(function, "bisection_function".to_string());
    let mut solver = ScalarRootFinder::new();
    solver.set_tolerance(tolerance);
    Ok(solver.bisection(&func, a, b)?.root)
}

pub fn secant<F>(function: F, x0: f64, x1: f64, tolerance: f64) -> Result<f64, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(function, "secant_function".to_string());
    let mut solver = ScalarRootFinder::new();
    solver.set_tolerance(tolerance);
    Ok(solver.secant(&func, x0, x1)?.root)
}

pub fn newton_raphson<F, D>(
    function: F,
    derivative: D,
    x0: f64,
    tolerance: f64,
) -> Result<f64, RootFindingError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let func = FunctionWithDerivative::new(function, derivative, "newton_function".to_string());
    let mut solver = ScalarRootFinder::new();
    solver.set_tolerance(tolerance);
    Ok(solver.newton_raphson(&func, x0)?.root)
}

pub fn false_position<F>(
    function: F,
    a: f64,
    b: f64,
    tolerance: f64,
) -> Result<f64, RootFindingError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(function, "false_position_function".to_string());
    let mut solver = ScalarRootFinder::new();
    solver.set_tolerance(tolerance);
    Ok(solver.false_position(&func, a, b)?.root)
}
/////////////////////////////////////////TESTS////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn cos_minus_x() -> FunctionWithDerivative<impl Fn(f64) -> f64, impl Fn(f64) -> f64> {
        FunctionWithDerivative::new(
            |x: f64| x.cos() - x,
            |x: f64| -x.sin() - 1.0,
            "cos(x) - x".to_string(),
        )
    }

    #[test]
    fn test_newton_raphson_cos_minus_x() {
        let solver = ScalarRootFinder::new();
        let result = solver.newton_raphson(&cos_minus_x(), 0.5).unwrap();
        assert_relative_eq!(result.root, 0.739085, epsilon = 1e-6);
        assert!(result.converged);
        assert_eq!(result.method, RootFindingMethod::NewtonRaphson);
        assert!(result.function_value.abs() < 1e-6);
        assert_eq!(result.history.len(), result.iterations + 1);
    }

    #[test]
    fn test_newton_raphson_without_derivative() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x - 4.0, "x^2 - 4".to_string());
        let result = solver.newton_raphson(&func, 1.0).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-6);
        assert!(result.converged);
    }

    #[test]
    fn test_newton_raphson_derivative_zero() {
        let solver = ScalarRootFinder::new();
        let func = FunctionWithDerivative::new(|x| x * x + 1.0, |x| 2.0 * x, "x^2 + 1".to_string());
        let result = solver.newton_raphson(&func, 0.0);
        assert!(matches!(result, Err(RootFindingError::DerivativeZero)));
    }

    #[test]
    fn test_bisection_cos_minus_x() {
        let solver = ScalarRootFinder::new();
        let result = solver.bisection(&cos_minus_x(), 0.0, 1.0).unwrap();
        assert_relative_eq!(result.root, 0.739085, epsilon = 1e-5);
        assert!(result.converged);
        assert!(result.function_value.abs() < 1e-6);
    }

    #[test]
    fn test_bisection_sqrt5() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x - 5.0, "x^2 - 5".to_string());
        let result = solver.bisection(&func, 2.0, 3.0).unwrap();
        assert_relative_eq!(result.root, 5f64.sqrt(), epsilon = 1e-6);
        assert!(result.iterations > 10);
        assert_eq!(result.history.len(), result.iterations + 1);
    }

    #[test]
    fn test_bisection_trigonometric() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x.sin(), "sin(x)".to_string());
        let result = solver.bisection(&func, 3.0, 4.0).unwrap();
        assert_relative_eq!(result.root, PI, epsilon = 1e-6);
    }

    #[test]
    fn test_bisection_no_sign_change() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x + 1.0, "x^2 + 1".to_string());
        let result = solver.bisection(&func, -1.0, 1.0);
        assert_eq!(result.unwrap_err(), RootFindingError::InvalidInterval);
    }

    #[test]
    fn test_bisection_max_iterations() {
        let mut solver = ScalarRootFinder::new();
        solver.set_max_iterations(5);
        solver.set_tolerance(1e-15);
        let func = ClosureFunction::new(|x| x * x - 5.0, "x^2 - 5".to_string());
        let result = solver.bisection(&func, 2.0, 3.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
        // the estimate is still inside the shrunken bracket
        assert!((result.root - 5f64.sqrt()).abs() < 1.0 / 32.0);
    }

    #[test]
    fn test_newton_raphson_max_iterations() {
        let mut solver = ScalarRootFinder::new();
        solver.set_max_iterations(2);
        solver.set_tolerance(1e-15);
        let func = FunctionWithDerivative::new(|x: f64| x * x - 5.0, |x: f64| 2.0 * x, "x^2 - 5".to_string());
        let result = solver.newton_raphson(&func, 2.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        // 2 -> 2.25 -> 2.25 - 0.0625 / 4.5
        let x2 = 2.25 - 0.0625 / 4.5;
        assert_relative_eq!(result.root, x2, epsilon = 1e-14);
        assert_relative_eq!(result.function_value, x2 * x2 - 5.0, epsilon = 1e-14);
        assert_eq!(result.history.len(), 3);
        assert_relative_eq!(result.history[1], 2.25, epsilon = 1e-14);
    }

    #[test]
    fn test_secant_max_iterations() {
        let mut solver = ScalarRootFinder::new();
        solver.set_max_iterations(2);
        solver.set_tolerance(1e-15);
        let func = ClosureFunction::new(|x| x * x - 5.0, "x^2 - 5".to_string());
        let result = solver.secant(&func, 2.0, 3.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        // x2 = 3 - 4 * 1 / 5 = 2.2, then the chord through (3, 4) and (2.2, -0.16)
        let x3 = 2.2 - (-0.16) * (2.2 - 3.0) / (-0.16 - 4.0);
        assert_relative_eq!(result.root, x3, epsilon = 1e-12);
        assert_eq!(result.history.len(), 4);
        assert_relative_eq!(result.history[2], 2.2, epsilon = 1e-12);
    }

    #[test]
    fn test_false_position_max_iterations() {
        let mut solver = ScalarRootFinder::new();
        solver.set_max_iterations(3);
        solver.set_tolerance(1e-15);
        let f = |x: f64| x * x - 5.0;
        let func = ClosureFunction::new(f, "x^2 - 5".to_string());
        let result = solver.false_position(&func, 2.0, 3.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        // f is convex, so the right end stays at b = 3
        let chord = |a: f64, b: f64| (a * f(b) - b * f(a)) / (f(b) - f(a));
        let c1 = chord(2.0, 3.0);
        let c2 = chord(c1, 3.0);
        let c3 = chord(c2, 3.0);
        assert_eq!(result.history.len(), 3);
        assert_relative_eq!(result.history[0], 2.2, epsilon = 1e-12);
        assert_relative_eq!(result.history[1], c2, epsilon = 1e-12);
        assert_relative_eq!(result.root, c3, epsilon = 1e-12);
        assert!(result.root < 5f64.sqrt());
    }

    #[test]
    fn test_secant_sqrt5() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x - 5.0, "x^2 - 5".to_string());
        let result = solver.secant(&func, 2.0, 3.0).unwrap();
        assert_relative_eq!(result.root, 5f64.sqrt(), epsilon = 1e-6);
        assert!(result.converged);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_secant_root_at_initial_guess() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x - 2.0, "x - 2".to_string());
        let result = solver.secant(&func, 3.0, 2.0).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-12);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_secant_flat_function() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|_x| 1.0, "constant function".to_string());
        let result = solver.secant(&func, 1.0, 1.0001);
        assert!(matches!(result, Err(RootFindingError::DerivativeZero)));
    }

    #[test]
    fn test_false_position_cubic() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x * x - x - 1.0, "x^3 - x - 1".to_string());
        let result = solver.false_position(&func, 1.0, 2.0).unwrap();
        assert_relative_eq!(result.root, 1.324717957244746, epsilon = 1e-6);
        assert!(result.converged);
        assert_eq!(result.method, RootFindingMethod::FalsePosition);
    }

    #[test]
    fn test_false_position_no_sign_change() {
        let solver = ScalarRootFinder::new();
        let func = ClosureFunction::new(|x| x * x - 5.0, "x^2 - 5".to_string());
        let result = solver.false_position(&func, 3.0, 4.0);
        assert_eq!(result.unwrap_err(), RootFindingError::InvalidInterval);
    }

    #[test]
    fn test_non_finite_start_rejected() {
        let solver = ScalarRootFinder::new();
        let result = solver.newton_raphson(&cos_minus_x(), f64::NAN);
        assert!(matches!(result, Err(RootFindingError::InvalidInput(_))));
    }

    #[test]
    fn test_solve_with_method_all_methods_agree() {
        let solver = ScalarRootFinder::new();
        let func = cos_minus_x();
        for method in RootFindingMethod::iter() {
            let result = solver
                .solve_with_method(&func, method, 0.5, Some((0.0, 1.0)))
                .unwrap();
            assert_relative_eq!(result.root, 0.739085, epsilon = 1e-5);
            assert_eq!(result.method, method);
        }
    }

    #[test]
    fn test_bracketing_method_needs_range() {
        let solver = ScalarRootFinder::new();
        let result =
            solver.solve_with_method(&cos_minus_x(), RootFindingMethod::Bisection, 0.5, None);
        assert!(matches!(result, Err(RootFindingError::InvalidInput(_))));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            RootFindingMethod::from_str("newton").unwrap(),
            RootFindingMethod::NewtonRaphson
        );
        assert_eq!(
            RootFindingMethod::from_str("Secant").unwrap(),
            RootFindingMethod::Secant
        );
        assert_eq!(
            RootFindingMethod::from_str("regula_falsi").unwrap(),
            RootFindingMethod::FalsePosition
        );
        assert!(RootFindingMethod::from_str("brent").is_err());
        assert_eq!(RootFindingMethod::Bisection.to_string(), "bisection");
    }

    #[test]
    fn test_convenience_functions() {
        let root = bisection(|x| x * x - 4.0, 0.0, 3.0, 1e-10).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-9);
        let root = secant(|x| x * x - 4.0, 1.0, 3.0, 1e-10).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-9);
        let root = newton_raphson(|x| x * x - 4.0, |x| 2.0 * x, 1.0, 1e-10).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-9);
        let root = false_position(|x| x * x - 4.0, 0.0, 3.0, 1e-10).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_error_measures() {
        assert_relative_eq!(absolute_error(0.739085, 0.739), 0.000085, epsilon = 1e-12);
        assert_relative_eq!(relative_error_percent(2.0, 4.0), 50.0);
    }
}
