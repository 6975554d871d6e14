//! Convenience minimization of scalar- and vector-argument functions

use std::fmt;

use crate::objective::{Arity, Objective};
use crate::{solver, Method, MinimizeOptions, OptimError, OptimizeResult};

/// Starting point of a minimization
#[derive(Debug, Clone, PartialEq)]
pub enum Start {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Start {
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Start::Scalar(x) => vec![*x],
            Start::Vector(xs) => xs.clone(),
        }
    }
}

impl From<f64> for Start {
    fn from(x: f64) -> Self {
        Start::Scalar(x)
    }
}

impl From<Vec<f64>> for Start {
    fn from(xs: Vec<f64>) -> Self {
        Start::Vector(xs)
    }
}

impl From<&[f64]> for Start {
    fn from(xs: &[f64]) -> Self {
        Start::Vector(xs.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Start {
    fn from(xs: [f64; N]) -> Self {
        Start::Vector(xs.to_vec())
    }
}

/// Location of a minimum, shaped like the start point
#[derive(Debug, Clone, PartialEq)]
pub enum Minimum {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Minimum {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Minimum::Scalar(x) => Some(*x),
            Minimum::Vector(_) => None,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            Minimum::Scalar(x) => std::slice::from_ref(x),
            Minimum::Vector(xs) => xs,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Minimum::Scalar(x) => vec![x],
            Minimum::Vector(xs) => xs,
        }
    }
}

/// Minimizer configuration.
///
/// Without [`smooth`](Self::smooth) or an explicit method in the options, the
/// derivative-free Powell method is used so that non-smooth objectives are
/// handled.
#[derive(Default)]
pub struct Minimize<'a> {
    start: Option<Start>,
    smooth: bool,
    log: Option<Box<dyn Fn(&OptimizeResult) + 'a>>,
    options: MinimizeOptions,
}

impl<'a> Minimize<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting point; required for vector objectives
    pub fn start(mut self, start: impl Into<Start>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Allow the gradient-based default method
    pub fn smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Receives the full result after each run
    pub fn log(mut self, log: impl Fn(&OptimizeResult) + 'a) -> Self {
        self.log = Some(Box::new(log));
        self
    }

    pub fn options(mut self, options: MinimizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Minimize `f` and return the arguments of its minimum
    pub fn minimize<Args, F: Objective<Args>>(&self, f: F) -> Result<Minimum, OptimError> {
        let arity = f.arity();
        let start = match (&self.start, arity) {
            (Some(start), _) => start.to_vec(),
            (None, Arity::Vector) => return Err(OptimError::StartRequired),
            (None, Arity::Fixed(0)) => return Err(OptimError::UnknownArity),
            (None, Arity::Fixed(n)) => vec![0.0; n],
        };
        if start.is_empty() {
            return Err(OptimError::EmptyStart);
        }
        if let Arity::Fixed(expected) = arity {
            if expected != start.len() {
                return Err(OptimError::DimensionMismatch {
                    expected,
                    found: start.len(),
                });
            }
        }

        let mut options = self.options.clone();
        if !self.smooth && options.method.is_none() {
            options.method = Some(Method::Powell);
        }
        tracing::debug!(?arity, ?start, method = ?options.method, "minimizing objective");

        let result = solver::minimize(|x: &[f64]| f.call(x), &start, &options)?;
        if !result.success {
            tracing::warn!(status = ?result.status, fun = result.fun, "{}", result.message);
        }
        if let Some(log) = &self.log {
            log(&result);
        }

        Ok(if start.len() == 1 {
            Minimum::Scalar(result.x[0])
        } else {
            Minimum::Vector(result.x)
        })
    }
}

impl fmt::Debug for Minimize<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minimize")
            .field("start", &self.start)
            .field("smooth", &self.smooth)
            .field("log", &self.log.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Minimize `f` with default settings, starting from `start` or from zeros
/// when the objective's argument count is known.
pub fn minimize<Args, F: Objective<Args>>(f: F, start: Option<Start>) -> Result<Minimum, OptimError> {
    let mut minimizer = Minimize::new();
    minimizer.start = start;
    minimizer.minimize(f)
}
