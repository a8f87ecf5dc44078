//! Third-order Taylor-series method for first-order ODEs y' = f(x, y).
use log::{debug, warn};
use std::fmt;

/// largest number of samples `taylor_curve` will produce
pub const MAX_CURVE_POINTS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum TaylorError {
    /// sample spacing must be positive and finite
    InvalidStep(f64),
    InvalidRange { start: f64, end: f64 },
    TooManyPoints { requested: f64, limit: usize },
}

impl fmt::Display for TaylorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaylorError::InvalidStep(dx) => {
                write!(f, "Sample step must be positive and finite, got {}", dx)
            }
            TaylorError::InvalidRange { start, end } => {
                write!(f, "Invalid sample range [{}, {}]", start, end)
            }
            TaylorError::TooManyPoints { requested, limit } => {
                write!(f, "{:.3e} samples requested, at most {} allowed", requested, limit)
            }
        }
    }
}

impl std::error::Error for TaylorError {}

/// An ODE that can supply the first three total derivatives of its solution
/// at a point (x, y).
pub trait TaylorOde {
    /// [y', y'', y''']
    fn derivatives(&self, x: f64, y: f64) -> [f64; 3];

    fn name(&self) -> &str {
        "unnamed_ode"
    }
}

/// y' = x^2 + y^2
/// differentiating along the solution:
/// y''  = 2 y y' + 2 x
/// y''' = 2 y y'' + 2 (y')^2 + 2
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticRiccati;

impl TaylorOde for QuadraticRiccati {
    fn derivatives(&self, x: f64, y: f64) -> [f64; 3] {
        let y1 = y * y + x * x;
        let y2 = 2.0 * y * y1 + 2.0 * x;
        let y3 = 2.0 * y * y2 + 2.0 * y1 * y1 + 2.0;
        [y1, y2, y3]
    }

    fn name(&self) -> &str {
        "y' = x^2 + y^2"
    }
}

/// closure-backed ODE for callers that already have the derivatives in closed form
pub struct ClosureOde<F>
where
    F: Fn(f64, f64) -> [f64; 3],
{
    func: F,
    name: String,
}

impl<F> ClosureOde<F>
where
    F: Fn(f64, f64) -> [f64; 3],
{
    pub fn new(func: F, name: String) -> Self {
        ClosureOde { func, name }
    }
}

impl<F> TaylorOde for ClosureOde<F>
where
    F: Fn(f64, f64) -> [f64; 3],
{
    fn derivatives(&self, x: f64, y: f64) -> [f64; 3] {
        (self.func)(x, y)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// y(x0 + h) ≈ y0 + h y' + h^2/2 y'' + h^3/6 y'''
pub fn taylor_step<O: TaylorOde>(ode: &O, x0: f64, y0: f64, h: f64) -> f64 {
    let [d1, d2, d3] = ode.derivatives(x0, y0);
    y0 + h * d1 + h * h / 2.0 * d2 + h * h * h / 6.0 * d3
}

/// March from x0 to x_target in `steps` equal Taylor steps.
/// Returns every grid point including the start.
pub fn taylor_march<O: TaylorOde>(
    ode: &O,
    x0: f64,
    y0: f64,
    x_target: f64,
    steps: usize,
) -> Vec<(f64, f64)> {
    let steps = steps.max(1);
    let h = (x_target - x0) / steps as f64;
    let mut solution = Vec::with_capacity(steps + 1);
    let (mut x, mut y) = (x0, y0);
    solution.push((x, y));
    for i in 1..=steps {
        y = taylor_step(ode, x, y, h);
        x = x0 + i as f64 * h;
        if !y.is_finite() {
            warn!("{}: solution blew up at x = {}", ode.name(), x);
            break;
        }
        solution.push((x, y));
    }
    debug!(
        "{}: marched to x = {} in {} steps, y = {}",
        ode.name(),
        x,
        steps,
        y
    );
    solution
}

/// Sample the single-step expansion around (x0, y0) on [x_start, x_end] with spacing dx.
/// The grid is built from an integer count so that the end point is not lost to rounding.
pub fn taylor_curve<O: TaylorOde>(
    ode: &O,
    x0: f64,
    y0: f64,
    x_start: f64,
    x_end: f64,
    dx: f64,
) -> Result<Vec<(f64, f64)>, TaylorError> {
    if !(dx > 0.0 && dx.is_finite()) {
        return Err(TaylorError::InvalidStep(dx));
    }
    if !(x_start.is_finite() && x_end.is_finite()) || x_end < x_start {
        return Err(TaylorError::InvalidRange {
            start: x_start,
            end: x_end,
        });
    }
    let intervals = ((x_end - x_start) / dx + 1e-9).floor();
    if intervals >= MAX_CURVE_POINTS as f64 {
        return Err(TaylorError::TooManyPoints {
            requested: intervals + 1.0,
            limit: MAX_CURVE_POINTS,
        });
    }
    let count = intervals as usize;
    Ok((0..=count)
        .map(|i| {
            let x = x_start + i as f64 * dx;
            (x, taylor_step(ode, x0, y0, x - x0))
        })
        .collect())
}
