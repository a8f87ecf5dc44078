//! Composite Newton–Cotes quadrature on a uniform grid, plus a Gauss–Legendre
//! reference value.
use gauss_quad::GaussLegendre;
use log::debug;
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QuadratureRule {
    #[strum(serialize = "trapezoidal")]
    Trapezoidal,
    #[strum(serialize = "simpson 1/3")]
    SimpsonOneThird,
    #[strum(serialize = "simpson 3/8")]
    SimpsonThreeEighths,
}

impl QuadratureRule {
    /// subinterval count must be a multiple of this
    pub fn panel_width(&self) -> usize {
        match self {
            QuadratureRule::Trapezoidal => 1,
            QuadratureRule::SimpsonOneThird => 2,
            QuadratureRule::SimpsonThreeEighths => 3,
        }
    }

    /// smallest valid subinterval count that is >= n (and at least one panel)
    pub fn round_subintervals(&self, n: usize) -> usize {
        let w = self.panel_width();
        n.max(1).div_ceil(w) * w
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    ZeroSubintervals,
    InvalidSubintervals { rule: QuadratureRule, n: usize },
    NonFiniteBounds,
    GaussLegendre(String),
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::ZeroSubintervals => write!(f, "Number of subintervals must be positive"),
            QuadratureError::InvalidSubintervals { rule, n } => write!(
                f,
                "{} rule needs a multiple of {} subintervals, got {}",
                rule,
                rule.panel_width(),
                n
            ),
            QuadratureError::NonFiniteBounds => write!(f, "Integration bounds must be finite"),
            QuadratureError::GaussLegendre(msg) => {
                write!(f, "Failed to create Gauss-Legendre quadrature: {}", msg)
            }
        }
    }
}

impl std::error::Error for QuadratureError {}

fn check_grid(rule: QuadratureRule, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadratureError::NonFiniteBounds);
    }
    if n == 0 {
        return Err(QuadratureError::ZeroSubintervals);
    }
    if n % rule.panel_width() != 0 {
        return Err(QuadratureError::InvalidSubintervals { rule, n });
    }
    Ok((b - a) / n as f64)
}

/// h/2 [f(a) + 2 sum f(a + i h) + f(b)]
pub fn trapezoidal<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let h = check_grid(QuadratureRule::Trapezoidal, a, b, n)?;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        sum += 2.0 * f(a + i as f64 * h);
    }
    let result = h / 2.0 * sum;
    debug!("trapezoidal rule, n = {}: {}", n, result);
    Ok(result)
}

/// h/3 [f0 + 4 f1 + 2 f2 + 4 f3 + ... + fn], n even
pub fn simpson_one_third<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let h = check_grid(QuadratureRule::SimpsonOneThird, a, b, n)?;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        sum += if i % 2 == 0 { 2.0 * f(x) } else { 4.0 * f(x) };
    }
    let result = sum * h / 3.0;
    debug!("Simpson 1/3 rule, n = {}: {}", n, result);
    Ok(result)
}

/// 3h/8 [f0 + 3 f1 + 3 f2 + 2 f3 + 3 f4 + ... + fn], n a multiple of 3
pub fn simpson_three_eighths<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let h = check_grid(QuadratureRule::SimpsonThreeEighths, a, b, n)?;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        sum += if i % 3 == 0 { 2.0 * f(x) } else { 3.0 * f(x) };
    }
    let result = 3.0 * h / 8.0 * sum;
    debug!("Simpson 3/8 rule, n = {}: {}", n, result);
    Ok(result)
}

pub fn integrate<F>(rule: QuadratureRule, f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    match rule {
        QuadratureRule::Trapezoidal => trapezoidal(f, a, b, n),
        QuadratureRule::SimpsonOneThird => simpson_one_third(f, a, b, n),
        QuadratureRule::SimpsonThreeEighths => simpson_three_eighths(f, a, b, n),
    }
}

/// Gauss–Legendre quadrature of the given degree, used as a reference value
pub fn gauss_legendre<F>(f: F, a: f64, b: f64, degree: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadratureError::NonFiniteBounds);
    }
    let quad = GaussLegendre::new(degree)
        .map_err(|e| QuadratureError::GaussLegendre(format!("{:?}", e)))?;
    Ok(quad.integrate(a, b, f))
}

/// (x, f(x)) on the n + 1 grid nodes of [a, b]
pub fn sample_points<F>(f: F, a: f64, b: f64, n: usize) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let n = n.max(1);
    (0..=n)
        .map(|i| {
            let x = a + i as f64 * (b - a) / n as f64;
            (x, f(x))
        })
        .collect()
}
