//! The eight computational mathematics tasks.
//!
//! Every task owns an input struct whose `Default` carries the default inputs of
//! the task, a `calculate` step that runs the numerical routine, and a
//! [`TaskReport`] with the result rows and the {x, y} series used for plotting.
//! Inputs can be overridden from a task file section (see `Utils::task_parser`).
//!  Example
//! ```
//! use CompMathTasks::tasks::Task;
//! let report = Task::by_key("task6").unwrap().calculate().unwrap();
//! assert!((report.scalar("y(x)").unwrap() - 6.25).abs() < 1e-12);
//! ```
use crate::Utils::task_parser::{SectionMap, Value};
use crate::numerical::curve_fitting::{FittingError, least_squares_line};
use crate::numerical::interpolation::{
    InterpolationError, newton_forward_derivative, newton_forward_interpolate,
};
use crate::numerical::jacobi::JacobiSolver;
use crate::numerical::quadrature::{
    QuadratureError, QuadratureRule, gauss_legendre, sample_points, simpson_three_eighths,
    trapezoidal,
};
use crate::numerical::root_finding::{
    FunctionWithDerivative, RootFindingConfig, RootFindingError, RootFindingMethod,
    ScalarRootFinder, absolute_error, relative_error_percent,
};
use crate::numerical::taylor_series::{
    QuadraticRiccati, TaylorError, taylor_curve, taylor_march, taylor_step,
};
use crate::somelinalg::linear_sys_diagnostics::{
    LinearSystemError, condition_number, is_diagonally_dominant,
};
use crate::somelinalg::some_matrix_inv::{IterativeInverse, residual};
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// number of points of a function plot
const PLOT_POINTS: usize = 100;

//////////////////////////////////////ERRORS//////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub enum TaskError {
    UnknownTask(String),
    /// key present in the task file but with an unusable value
    InvalidParameter { key: String, message: String },
    RootFinding(RootFindingError),
    LinearSystem(LinearSystemError),
    Fitting(FittingError),
    Interpolation(InterpolationError),
    Quadrature(QuadratureError),
    Taylor(TaylorError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::UnknownTask(name) => write!(f, "Unknown task: {}", name),
            TaskError::InvalidParameter { key, message } => {
                write!(f, "Invalid value for '{}': {}", key, message)
            }
            TaskError::RootFinding(e) => write!(f, "Root finding failed: {}", e),
            TaskError::LinearSystem(e) => write!(f, "Linear system error: {}", e),
            TaskError::Fitting(e) => write!(f, "Curve fitting failed: {}", e),
            TaskError::Interpolation(e) => write!(f, "Interpolation failed: {}", e),
            TaskError::Quadrature(e) => write!(f, "Integration failed: {}", e),
            TaskError::Taylor(e) => write!(f, "Taylor series failed: {}", e),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<RootFindingError> for TaskError {
    fn from(e: RootFindingError) -> Self {
        TaskError::RootFinding(e)
    }
}

impl From<LinearSystemError> for TaskError {
    fn from(e: LinearSystemError) -> Self {
        TaskError::LinearSystem(e)
    }
}

impl From<FittingError> for TaskError {
    fn from(e: FittingError) -> Self {
        TaskError::Fitting(e)
    }
}

impl From<InterpolationError> for TaskError {
    fn from(e: InterpolationError) -> Self {
        TaskError::Interpolation(e)
    }
}

impl From<QuadratureError> for TaskError {
    fn from(e: QuadratureError) -> Self {
        TaskError::Quadrature(e)
    }
}

impl From<TaylorError> for TaskError {
    fn from(e: TaylorError) -> Self {
        TaskError::Taylor(e)
    }
}

//////////////////////////////////////REPORT//////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Scalar(f64),
    /// error or residual, shown in scientific notation
    Error(f64),
    Count(usize),
    Flag(bool),
    Text(String),
    Vector(DVector<f64>),
    Matrix(DMatrix<f64>),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportValue::Scalar(v) => write!(f, "{:.6}", v),
            ReportValue::Error(v) => write!(f, "{:.3e}", v),
            ReportValue::Count(n) => write!(f, "{}", n),
            ReportValue::Flag(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            ReportValue::Text(s) => write!(f, "{}", s),
            ReportValue::Vector(v) => {
                let items: Vec<String> = v.iter().map(|x| format!("{:.6}", x)).collect();
                write!(f, "[{}]", items.join(", "))
            }
            ReportValue::Matrix(m) => {
                let rows: Vec<String> = m
                    .row_iter()
                    .map(|row| {
                        let items: Vec<String> = row.iter().map(|x| format!("{:.6}", x)).collect();
                        format!("[{}]", items.join(", "))
                    })
                    .collect();
                write!(f, "{}", rows.join("\n"))
            }
        }
    }
}

/// named {x, y} sample series
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: &str, x_label: &str, y_label: &str, points: Vec<(f64, f64)>) -> Self {
        Series {
            name: name.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub key: String,
    pub title: String,
    /// ordered (label, value) result rows
    pub rows: Vec<(String, ReportValue)>,
    pub series: Vec<Series>,
}

impl TaskReport {
    fn new(task: &Task) -> Self {
        TaskReport {
            key: task.key().to_string(),
            title: task.to_string(),
            rows: Vec::new(),
            series: Vec::new(),
        }
    }

    fn row(&mut self, label: &str, value: ReportValue) {
        self.rows.push((label.to_string(), value));
    }

    pub fn get(&self, label: &str) -> Option<&ReportValue> {
        self.rows.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn scalar(&self, label: &str) -> Option<f64> {
        match self.get(label)? {
            ReportValue::Scalar(v) | ReportValue::Error(v) => Some(*v),
            ReportValue::Count(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// `count` evenly spaced samples of f on [min, max), as plotted by the function charts
pub fn function_samples<F: Fn(f64) -> f64>(f: F, min: f64, max: f64, count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let x = min + i as f64 / count as f64 * (max - min);
            (x, f(x))
        })
        .collect()
}

//////////////////////////////////////INPUTS//////////////////////////////////////////////
/// f(x) = cos x - x, Newton from a guess or a bracketing method on an interval
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalRootInput {
    pub method: RootFindingMethod,
    pub initial_guess: f64,
    pub interval: (f64, f64),
    /// root read off the plot
    pub visual_root: f64,
    pub config: RootFindingConfig,
}

impl Default for GraphicalRootInput {
    fn default() -> Self {
        GraphicalRootInput {
            method: RootFindingMethod::NewtonRaphson,
            initial_guess: 0.5,
            interval: (0.0, 1.0),
            visual_root: 0.739,
            config: RootFindingConfig::default(),
        }
    }
}

/// f(x) = x^2 - 5 on [a, b]
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingInput {
    pub method: RootFindingMethod,
    pub a: f64,
    pub b: f64,
    pub config: RootFindingConfig,
}

impl Default for RootFindingInput {
    fn default() -> Self {
        RootFindingInput {
            method: RootFindingMethod::Bisection,
            a: 2.0,
            b: 3.0,
            config: RootFindingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JacobiInput {
    pub A: DMatrix<f64>,
    pub b: DVector<f64>,
    pub x0: DVector<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,
    /// try a diagonally dominant reordering of the equations first
    pub reorder: bool,
}

impl Default for JacobiInput {
    fn default() -> Self {
        JacobiInput {
            A: DMatrix::from_row_slice(3, 3, &[1.0, 1.0, 1.0, 0.0, 2.0, 5.0, 2.0, 3.0, 1.0]),
            b: DVector::from_vec(vec![6.0, -4.0, 27.0]),
            x0: DVector::zeros(3),
            tolerance: 1e-6,
            max_iterations: 100,
            reorder: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixInversionInput {
    pub A: DMatrix<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for MatrixInversionInput {
    fn default() -> Self {
        MatrixInversionInput {
            A: DMatrix::from_row_slice(3, 3, &[5.0, -3.0, 2.0, -3.0, 9.0, -1.0, 2.0, -1.0, 7.0]),
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveFittingInput {
    pub points: Vec<(f64, f64)>,
}

impl Default for CurveFittingInput {
    fn default() -> Self {
        CurveFittingInput {
            points: vec![(1.0, 5.0), (2.0, 8.0), (3.0, 12.0), (4.0, 15.0), (5.0, 20.0)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForwardDifferenceInput {
    pub points: Vec<(f64, f64)>,
    pub target: f64,
}

impl Default for ForwardDifferenceInput {
    fn default() -> Self {
        ForwardDifferenceInput {
            points: vec![(0.0, 1.0), (1.0, 4.0), (2.0, 9.0), (3.0, 16.0)],
            target: 1.5,
        }
    }
}

/// y' = x^2 + y^2, y(x0) = y0
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorSeriesInput {
    pub x0: f64,
    pub y0: f64,
    pub target: f64,
    /// steps of the multi-step comparison
    pub steps: usize,
    pub curve_end: f64,
    pub curve_step: f64,
}

impl Default for TaylorSeriesInput {
    fn default() -> Self {
        TaylorSeriesInput {
            x0: 0.0,
            y0: 1.0,
            target: 0.1,
            steps: 10,
            curve_end: 0.2,
            curve_step: 0.01,
        }
    }
}

/// integral of x^2 + x over [a, b]
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureInput {
    pub a: f64,
    pub b: f64,
    pub n: usize,
    pub gauss_degree: usize,
}

impl Default for QuadratureInput {
    fn default() -> Self {
        QuadratureInput {
            a: 0.0,
            b: 1.0,
            n: 4,
            gauss_degree: 5,
        }
    }
}

//////////////////////////////////////TASKS//////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Display, EnumIter)]
pub enum Task {
    #[strum(to_string = "Task 1: Graphical Method and Absolute Error")]
    GraphicalRoot(GraphicalRootInput),
    #[strum(to_string = "Task 2: Root-Finding Methods")]
    RootFinding(RootFindingInput),
    #[strum(to_string = "Task 3: Jacobi Method")]
    Jacobi(JacobiInput),
    #[strum(to_string = "Task 4: Matrix Inversion")]
    MatrixInversion(MatrixInversionInput),
    #[strum(to_string = "Task 5: Linear Curve Fitting")]
    CurveFitting(CurveFittingInput),
    #[strum(to_string = "Task 6: Newton's Forward Interpolation")]
    ForwardDifference(ForwardDifferenceInput),
    #[strum(to_string = "Task 7: Taylor Series Method")]
    TaylorSeries(TaylorSeriesInput),
    #[strum(to_string = "Task 8: Trapezoidal and Simpson's 3/8 Rules")]
    Quadrature(QuadratureInput),
}

impl Task {
    /// section title used in task files
    pub fn key(&self) -> &'static str {
        match self {
            Task::GraphicalRoot(_) => "task1",
            Task::RootFinding(_) => "task2",
            Task::Jacobi(_) => "task3",
            Task::MatrixInversion(_) => "task4",
            Task::CurveFitting(_) => "task5",
            Task::ForwardDifference(_) => "task6",
            Task::TaylorSeries(_) => "task7",
            Task::Quadrature(_) => "task8",
        }
    }

    /// task with default inputs, by key ("task3") or by name ("jacobi")
    pub fn by_key(name: &str) -> Result<Task, TaskError> {
        let task = match name.to_lowercase().as_str() {
            "task1" | "graphical" | "graphical_root" => Task::GraphicalRoot(Default::default()),
            "task2" | "root_finding" => Task::RootFinding(Default::default()),
            "task3" | "jacobi" => Task::Jacobi(Default::default()),
            "task4" | "matrix_inversion" | "inverse" => Task::MatrixInversion(Default::default()),
            "task5" | "curve_fitting" | "least_squares" => Task::CurveFitting(Default::default()),
            "task6" | "forward_difference" | "interpolation" => {
                Task::ForwardDifference(Default::default())
            }
            "task7" | "taylor_series" | "taylor" => Task::TaylorSeries(Default::default()),
            "task8" | "quadrature" | "simpson" => Task::Quadrature(Default::default()),
            _ => return Err(TaskError::UnknownTask(name.to_string())),
        };
        Ok(task)
    }

    /// keys a task file section may set
    fn accepts_key(&self, key: &str) -> bool {
        let keys: &[&str] = match self {
            Task::GraphicalRoot(_) => &[
                "method",
                "initial_guess",
                "visual_root",
                "interval",
                "tolerance",
                "max_iterations",
            ],
            Task::RootFinding(_) => &["method", "a", "b", "tolerance", "max_iterations"],
            Task::Jacobi(_) => &["b", "x0", "tolerance", "max_iterations", "reorder"],
            Task::MatrixInversion(_) => &["tolerance", "max_iterations"],
            Task::CurveFitting(_) => &["x", "y"],
            Task::ForwardDifference(_) => &["x", "y", "target"],
            Task::TaylorSeries(_) => &["x0", "y0", "target", "steps", "curve_end", "curve_step"],
            Task::Quadrature(_) => &["a", "b", "n", "gauss_degree"],
        };
        let matrix_row = matches!(self, Task::Jacobi(_) | Task::MatrixInversion(_))
            && row_index(key).is_some();
        keys.contains(&key) || matrix_row
    }

    /// all eight tasks with their default inputs
    pub fn all() -> Vec<Task> {
        use strum::IntoEnumIterator;
        Task::iter().collect()
    }

    /// Builds a task from a parsed task file section. Keys that are absent keep their defaults.
    pub fn from_section(title: &str, section: &SectionMap) -> Result<Task, TaskError> {
        let mut task = Task::by_key(title)?;
        let unknown = section.keys().filter(|key| !task.accepts_key(key)).min();
        if let Some(key) = unknown {
            return Err(SectionReader::invalid(
                key,
                &format!("not a parameter of {}", task.key()),
            ));
        }
        let params = SectionReader { section };
        match &mut task {
            Task::GraphicalRoot(input) => {
                if let Some(method) = params.method("method")? {
                    input.method = method;
                }
                params.set_f64("initial_guess", &mut input.initial_guess)?;
                params.set_f64("visual_root", &mut input.visual_root)?;
                if let Some((a, b)) = params.pair("interval")? {
                    input.interval = (a, b);
                }
                params.set_config(&mut input.config)?;
            }
            Task::RootFinding(input) => {
                if let Some(method) = params.method("method")? {
                    input.method = method;
                }
                params.set_f64("a", &mut input.a)?;
                params.set_f64("b", &mut input.b)?;
                params.set_config(&mut input.config)?;
            }
            Task::Jacobi(input) => {
                if let Some(A) = params.matrix()? {
                    input.x0 = DVector::zeros(A.nrows());
                    input.A = A;
                }
                if let Some(b) = params.vector("b")? {
                    input.b = b;
                }
                if let Some(x0) = params.vector("x0")? {
                    input.x0 = x0;
                }
                params.set_tolerance(&mut input.tolerance)?;
                params.set_usize("max_iterations", &mut input.max_iterations)?;
                params.set_bool("reorder", &mut input.reorder)?;
            }
            Task::MatrixInversion(input) => {
                if let Some(A) = params.matrix()? {
                    input.A = A;
                }
                params.set_tolerance(&mut input.tolerance)?;
                params.set_usize("max_iterations", &mut input.max_iterations)?;
            }
            Task::CurveFitting(input) => {
                if let Some(points) = params.points()? {
                    input.points = points;
                }
            }
            Task::ForwardDifference(input) => {
                if let Some(points) = params.points()? {
                    input.points = points;
                }
                params.set_f64("target", &mut input.target)?;
            }
            Task::TaylorSeries(input) => {
                params.set_f64("x0", &mut input.x0)?;
                params.set_f64("y0", &mut input.y0)?;
                params.set_f64("target", &mut input.target)?;
                params.set_usize("steps", &mut input.steps)?;
                params.set_f64("curve_end", &mut input.curve_end)?;
                params.set_positive("curve_step", &mut input.curve_step)?;
            }
            Task::Quadrature(input) => {
                params.set_f64("a", &mut input.a)?;
                params.set_f64("b", &mut input.b)?;
                params.set_usize("n", &mut input.n)?;
                params.set_usize("gauss_degree", &mut input.gauss_degree)?;
            }
        }
        debug!("{} built from task file: {:?}", task.key(), task);
        Ok(task)
    }

    pub fn calculate(&self) -> Result<TaskReport, TaskError> {
        info!("Calculating {}", self);
        let mut report = TaskReport::new(self);
        match self {
            Task::GraphicalRoot(input) => graphical_root(input, &mut report)?,
            Task::RootFinding(input) => root_finding(input, &mut report)?,
            Task::Jacobi(input) => jacobi(input, &mut report)?,
            Task::MatrixInversion(input) => matrix_inversion(input, &mut report)?,
            Task::CurveFitting(input) => curve_fitting(input, &mut report)?,
            Task::ForwardDifference(input) => forward_difference(input, &mut report)?,
            Task::TaylorSeries(input) => taylor_series(input, &mut report)?,
            Task::Quadrature(input) => quadrature(input, &mut report)?,
        }
        Ok(report)
    }
}

//////////////////////////////////////CALCULATIONS//////////////////////////////////////////////
fn graphical_root(input: &GraphicalRootInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let f = |x: f64| x.cos() - x;
    let function = FunctionWithDerivative::new(f, |x: f64| -x.sin() - 1.0, "cos(x) - x".to_string());
    let solver = ScalarRootFinder::with_config(input.config.clone());
    let result = solver.solve_with_method(
        &function,
        input.method,
        input.initial_guess,
        Some(input.interval),
    )?;

    report.row("method", ReportValue::Text(result.method.to_string()));
    report.row("root", ReportValue::Scalar(result.root));
    report.row("f(root)", ReportValue::Scalar(result.function_value));
    report.row("iterations", ReportValue::Count(result.iterations));
    report.row("converged", ReportValue::Flag(result.converged));
    report.row("visual root", ReportValue::Scalar(input.visual_root));
    report.row(
        "absolute error",
        ReportValue::Error(absolute_error(result.root, input.visual_root)),
    );
    report.series.push(Series::new(
        "f(x)",
        "x",
        "f(x)",
        function_samples(f, input.interval.0, input.interval.1, PLOT_POINTS),
    ));
    report.series.push(iterates_series(&result.history));
    Ok(())
}

fn root_finding(input: &RootFindingInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let f = |x: f64| x * x - 5.0;
    let function = FunctionWithDerivative::new(f, |x: f64| 2.0 * x, "x^2 - 5".to_string());
    let solver = ScalarRootFinder::with_config(input.config.clone());
    let result = solver.solve_with_method(&function, input.method, input.a, Some((input.a, input.b)))?;
    let exact = 5.0f64.sqrt();

    report.row("method", ReportValue::Text(result.method.to_string()));
    report.row("root", ReportValue::Scalar(result.root));
    report.row("iterations", ReportValue::Count(result.iterations));
    report.row("converged", ReportValue::Flag(result.converged));
    report.row("exact root", ReportValue::Scalar(exact));
    report.row(
        "relative error, %",
        ReportValue::Error(relative_error_percent(result.root, exact)),
    );
    report.series.push(Series::new(
        "f(x)",
        "x",
        "f(x)",
        function_samples(f, input.a - 1.0, input.b + 1.0, PLOT_POINTS),
    ));
    report.series.push(iterates_series(&result.history));
    Ok(())
}

fn iterates_series(history: &[f64]) -> Series {
    let points = history
        .iter()
        .enumerate()
        .map(|(i, x)| (i as f64, *x))
        .collect();
    Series::new("iterates", "iteration", "x", points)
}

fn jacobi(input: &JacobiInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let solver = JacobiSolver {
        tolerance: input.tolerance,
        max_iterations: input.max_iterations,
    };
    let result = if input.reorder {
        solver.solve_reordered(&input.A, &input.b, &input.x0)?
    } else {
        solver.solve(&input.A, &input.b, &input.x0)?
    };

    report.row("solution", ReportValue::Vector(result.solution.clone()));
    report.row("iterations", ReportValue::Count(result.iterations));
    report.row("converged", ReportValue::Flag(result.converged));
    report.row("last change", ReportValue::Error(result.error));
    report.row(
        "diagonally dominant",
        ReportValue::Flag(is_diagonally_dominant(&input.A, false)),
    );
    for i in 0..result.solution.len() {
        let points = result
            .history
            .iter()
            .map(|(iter, x)| (*iter as f64, x[i]))
            .collect();
        let name = format!("x{}", i + 1);
        report.series.push(Series::new(&name, "iteration", &name, points));
    }
    Ok(())
}

fn matrix_inversion(input: &MatrixInversionInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let inverter = IterativeInverse {
        tolerance: input.tolerance,
        max_iterations: input.max_iterations,
        ..Default::default()
    };
    let result = inverter.invert(&input.A)?;

    report.row("inverse", ReportValue::Matrix(result.inverse.clone()));
    report.row("iterations", ReportValue::Count(result.iterations));
    report.row("converged", ReportValue::Flag(result.converged));
    report.row(
        "residual max|AX - I|",
        ReportValue::Error(residual(&input.A, &result.inverse)),
    );
    report.row(
        "condition number",
        ReportValue::Scalar(condition_number(&input.A)),
    );
    let points = result
        .history
        .iter()
        .map(|(iter, error)| (*iter as f64, *error))
        .collect();
    report.series.push(Series::new("error", "iteration", "max change", points));
    Ok(())
}

fn curve_fitting(input: &CurveFittingInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let fit = least_squares_line(&input.points)?;

    report.row("slope a", ReportValue::Scalar(fit.a));
    report.row("intercept b", ReportValue::Scalar(fit.b));
    report.row("r squared", ReportValue::Scalar(fit.r_squared(&input.points)));
    report.series.push(Series::new("data", "x", "y", input.points.clone()));
    report.series.push(Series::new("fitted line", "x", "a x + b", fit.fitted));
    Ok(())
}

fn forward_difference(input: &ForwardDifferenceInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let interpolation = newton_forward_interpolate(&input.points, input.target)?;
    let derivative = newton_forward_derivative(&input.points, input.target)?;

    report.row("y(x)", ReportValue::Scalar(interpolation.value));
    report.row("dy/dx", ReportValue::Scalar(derivative));
    report.row("p", ReportValue::Scalar(interpolation.p));
    report.row("h", ReportValue::Scalar(interpolation.step));
    let leading: Vec<f64> = interpolation.table[0].clone();
    report.row(
        "leading differences",
        ReportValue::Vector(DVector::from_vec(leading)),
    );
    report.series.push(Series::new("data", "x", "y", input.points.clone()));
    report.series.push(Series::new(
        "target",
        "x",
        "y",
        vec![(input.target, interpolation.value)],
    ));
    Ok(())
}

fn taylor_series(input: &TaylorSeriesInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let ode = QuadraticRiccati;
    let single = taylor_step(&ode, input.x0, input.y0, input.target - input.x0);
    let marched = taylor_march(&ode, input.x0, input.y0, input.target, input.steps);
    let (_, y_marched) = marched.last().copied().unwrap_or((input.x0, input.y0));

    report.row("y(target), single step", ReportValue::Scalar(single));
    report.row(
        &format!("y(target), {} steps", input.steps.max(1)),
        ReportValue::Scalar(y_marched),
    );
    report.row("h", ReportValue::Scalar(input.target - input.x0));
    let curve = taylor_curve(&ode, input.x0, input.y0, input.x0, input.curve_end, input.curve_step)?;
    report.series.push(Series::new("taylor", "x", "y", curve));
    report.series.push(Series::new("marched", "x", "y", marched));
    Ok(())
}

fn quadrature(input: &QuadratureInput, report: &mut TaskReport) -> Result<(), TaskError> {
    let f = |x: f64| x * x + x;
    let (a, b) = (input.a, input.b);
    let exact = b.powi(3) / 3.0 + b * b / 2.0 - (a.powi(3) / 3.0 + a * a / 2.0);
    let trapezoid = trapezoidal(f, a, b, input.n)?;
    let n_38 = QuadratureRule::SimpsonThreeEighths.round_subintervals(input.n);
    let simpson = simpson_three_eighths(f, a, b, n_38)?;
    let gauss = gauss_legendre(f, a, b, input.gauss_degree)?;

    report.row("trapezoidal", ReportValue::Scalar(trapezoid));
    report.row("trapezoidal error", ReportValue::Error((trapezoid - exact).abs()));
    report.row("simpson 3/8 subintervals", ReportValue::Count(n_38));
    report.row("simpson 3/8", ReportValue::Scalar(simpson));
    report.row("simpson 3/8 error", ReportValue::Error((simpson - exact).abs()));
    report.row("gauss-legendre", ReportValue::Scalar(gauss));
    report.row("exact", ReportValue::Scalar(exact));
    report.series.push(Series::new("integrand", "x", "f(x)", sample_points(f, a, b, input.n)));
    Ok(())
}

//////////////////////////////////////TASK FILE SECTIONS//////////////////////////////////////////////
/// "row3" -> 3
fn row_index(key: &str) -> Option<usize> {
    key.strip_prefix("row")?.parse::<usize>().ok().filter(|&i| i >= 1)
}

struct SectionReader<'a> {
    section: &'a SectionMap,
}

impl SectionReader<'_> {
    fn values(&self, key: &str) -> Option<&Vec<Value>> {
        self.section.get(key)
    }

    fn invalid(key: &str, message: &str) -> TaskError {
        TaskError::InvalidParameter {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    fn single(&self, key: &str) -> Result<Option<&Value>, TaskError> {
        match self.values(key) {
            None => Ok(None),
            Some(values) if values.len() == 1 => Ok(values.first()),
            Some(values) => Err(Self::invalid(
                key,
                &format!("expected a single value, got {}", values.len()),
            )),
        }
    }

    fn numbers(&self, key: &str) -> Result<Option<Vec<f64>>, TaskError> {
        let Some(values) = self.values(key) else {
            return Ok(None);
        };
        values
            .iter()
            .map(|v| {
                v.as_f64()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| Self::invalid(key, &format!("'{}' is not a finite number", v)))
            })
            .collect::<Result<Vec<f64>, TaskError>>()
            .map(Some)
    }

    fn set_f64(&self, key: &str, target: &mut f64) -> Result<(), TaskError> {
        if let Some(value) = self.single(key)? {
            *target = value
                .as_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(|| Self::invalid(key, &format!("'{}' is not a finite number", value)))?;
        }
        Ok(())
    }

    fn set_usize(&self, key: &str, target: &mut usize) -> Result<(), TaskError> {
        if let Some(value) = self.single(key)? {
            *target = value.as_usize().ok_or_else(|| {
                Self::invalid(key, &format!("'{}' is not a non-negative integer", value))
            })?;
        }
        Ok(())
    }

    fn set_bool(&self, key: &str, target: &mut bool) -> Result<(), TaskError> {
        if let Some(value) = self.single(key)? {
            *target = value
                .as_boolean()
                .ok_or_else(|| Self::invalid(key, &format!("'{}' is not true or false", value)))?;
        }
        Ok(())
    }

    fn set_positive(&self, key: &str, target: &mut f64) -> Result<(), TaskError> {
        let mut value = *target;
        self.set_f64(key, &mut value)?;
        if value <= 0.0 {
            return Err(Self::invalid(key, "must be positive"));
        }
        *target = value;
        Ok(())
    }

    fn set_tolerance(&self, target: &mut f64) -> Result<(), TaskError> {
        self.set_positive("tolerance", target)
    }

    fn set_config(&self, config: &mut RootFindingConfig) -> Result<(), TaskError> {
        self.set_tolerance(&mut config.tolerance)?;
        self.set_usize("max_iterations", &mut config.max_iterations)
    }

    fn method(&self, key: &str) -> Result<Option<RootFindingMethod>, TaskError> {
        let Some(value) = self.single(key)? else {
            return Ok(None);
        };
        let name = value.to_string();
        RootFindingMethod::from_str(&name)
            .map(Some)
            .map_err(|_| Self::invalid(key, &format!("unknown method '{}'", name)))
    }

    fn pair(&self, key: &str) -> Result<Option<(f64, f64)>, TaskError> {
        match self.numbers(key)? {
            None => Ok(None),
            Some(v) if v.len() == 2 => Ok(Some((v[0], v[1]))),
            Some(v) => Err(Self::invalid(key, &format!("expected 2 values, got {}", v.len()))),
        }
    }

    fn vector(&self, key: &str) -> Result<Option<DVector<f64>>, TaskError> {
        Ok(self.numbers(key)?.map(DVector::from_vec))
    }

    /// rows written as row1, row2, ... ; every row must have the same length
    fn matrix(&self) -> Result<Option<DMatrix<f64>>, TaskError> {
        let mut rows = Vec::new();
        while let Some(row) = self.numbers(&format!("row{}", rows.len() + 1))? {
            rows.push(row);
        }
        let stray = self
            .section
            .keys()
            .filter(|k| row_index(k).is_some_and(|i| i > rows.len()))
            .min();
        if let Some(key) = stray {
            return Err(Self::invalid(key, &format!("row{} is missing", rows.len() + 1)));
        }
        if rows.is_empty() {
            return Ok(None);
        }
        let ncols = rows[0].len();
        if let Some(i) = rows.iter().position(|r| r.len() != ncols) {
            return Err(Self::invalid(
                &format!("row{}", i + 1),
                &format!("expected {} values, got {}", ncols, rows[i].len()),
            ));
        }
        let flat: Vec<f64> = rows.concat();
        Ok(Some(DMatrix::from_row_slice(rows.len(), ncols, &flat)))
    }

    /// x: x1, x2, ... and y: y1, y2, ... of equal length
    fn points(&self) -> Result<Option<Vec<(f64, f64)>>, TaskError> {
        match (self.numbers("x")?, self.numbers("y")?) {
            (None, None) => Ok(None),
            (Some(xs), Some(ys)) if xs.len() == ys.len() => {
                Ok(Some(xs.into_iter().zip(ys).collect()))
            }
            (Some(xs), Some(ys)) => Err(Self::invalid(
                "y",
                &format!("{} x values but {} y values", xs.len(), ys.len()),
            )),
            _ => Err(Self::invalid("x", "x and y must be given together")),
        }
    }
}
