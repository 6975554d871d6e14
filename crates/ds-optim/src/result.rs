//! Outcome of a minimization run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Method;

/// Why the optimizer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceStatus {
    /// A tolerance was met
    Converged,
    /// Reached the iteration limit
    MaxIterations,
    /// Reached the function evaluation limit
    MaxEvaluations,
    /// No step made progress (line search failed)
    Stalled,
}

impl ConvergenceStatus {
    pub fn message(self) -> &'static str {
        match self {
            ConvergenceStatus::Converged => "Optimization terminated successfully.",
            ConvergenceStatus::MaxIterations => "Maximum number of iterations has been exceeded.",
            ConvergenceStatus::MaxEvaluations => "Maximum number of function evaluations has been exceeded.",
            ConvergenceStatus::Stalled => "Desired error not necessarily achieved due to precision loss.",
        }
    }
}

/// Full diagnostic result of a minimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResult {
    /// Location of the minimum found
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub fun: f64,
    /// Iterations performed
    pub nit: usize,
    /// Objective evaluations performed
    pub nfev: usize,
    pub status: ConvergenceStatus,
    pub success: bool,
    pub message: String,
    pub method: Method,
}

impl OptimizeResult {
    pub(crate) fn new(method: Method, x: Vec<f64>, fun: f64, nit: usize, nfev: usize, status: ConvergenceStatus) -> Self {
        Self {
            x,
            fun,
            nit,
            nfev,
            status,
            success: status == ConvergenceStatus::Converged,
            message: status.message().to_string(),
            method,
        }
    }
}

impl fmt::Display for OptimizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " message: {}", self.message)?;
        writeln!(f, " success: {}", self.success)?;
        writeln!(f, "  status: {:?}", self.status)?;
        writeln!(f, "     fun: {}", self.fun)?;
        writeln!(f, "       x: {:?}", self.x)?;
        writeln!(f, "     nit: {}", self.nit)?;
        writeln!(f, "    nfev: {}", self.nfev)?;
        write!(f, "  method: {}", self.method)
    }
}
