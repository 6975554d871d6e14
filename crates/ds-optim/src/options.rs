//! Optimizer selection and stopping criteria

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OptimError;

/// Minimization algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    /// Derivative-free line searches along a conjugate direction set
    Powell,
    /// Derivative-free downhill simplex
    #[serde(rename = "Nelder-Mead")]
    NelderMead,
    /// Quasi-Newton with a finite-difference gradient
    #[default]
    #[serde(rename = "BFGS")]
    Bfgs,
}

impl Method {
    /// Iteration cap used when `max_iter` is unset
    pub fn default_max_iter(self, n: usize) -> usize {
        match self {
            Method::Powell | Method::NelderMead => 1000 * n,
            Method::Bfgs => 200 * n,
        }
    }

    /// Evaluation cap used when `max_fev` is unset
    pub fn default_max_fev(self, n: usize) -> usize {
        match self {
            Method::Powell | Method::NelderMead => 2000 * n,
            Method::Bfgs => 20_000 * n,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Powell => "Powell",
            Method::NelderMead => "Nelder-Mead",
            Method::Bfgs => "BFGS",
        })
    }
}

impl FromStr for Method {
    type Err = OptimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "powell" => Ok(Method::Powell),
            "nelder-mead" | "neldermead" => Ok(Method::NelderMead),
            "bfgs" => Ok(Method::Bfgs),
            _ => Err(OptimError::UnknownMethod(s.to_string())),
        }
    }
}

/// Options forwarded to the optimizer; unset fields take per-method defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimizeOptions {
    pub method: Option<Method>,
    pub max_iter: Option<usize>,
    pub max_fev: Option<usize>,
    /// Step tolerance
    pub xtol: Option<f64>,
    /// Relative objective tolerance
    pub ftol: Option<f64>,
    /// Gradient tolerance, BFGS only
    pub gtol: Option<f64>,
}

impl MinimizeOptions {
    pub const DEFAULT_XTOL: f64 = 1e-6;
    pub const DEFAULT_FTOL: f64 = 1e-8;
    pub const DEFAULT_GTOL: f64 = 1e-5;

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn with_max_fev(mut self, max_fev: usize) -> Self {
        self.max_fev = Some(max_fev);
        self
    }

    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = Some(xtol);
        self
    }

    pub fn with_ftol(mut self, ftol: f64) -> Self {
        self.ftol = Some(ftol);
        self
    }

    pub fn with_gtol(mut self, gtol: f64) -> Self {
        self.gtol = Some(gtol);
        self
    }

    pub(crate) fn xtol(&self) -> f64 {
        self.xtol.unwrap_or(Self::DEFAULT_XTOL)
    }

    pub(crate) fn ftol(&self) -> f64 {
        self.ftol.unwrap_or(Self::DEFAULT_FTOL)
    }

    pub(crate) fn gtol(&self) -> f64 {
        self.gtol.unwrap_or(Self::DEFAULT_GTOL)
    }

    /// Check tolerances are positive and caps non-zero
    pub fn validate(&self) -> Result<(), OptimError> {
        let tolerances = [("xtol", self.xtol), ("ftol", self.ftol), ("gtol", self.gtol)];
        for (name, value) in tolerances {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(OptimError::InvalidOption {
                        name,
                        reason: format!("must be a positive number, got {value}"),
                    });
                }
            }
        }
        for (name, cap) in [("max_iter", self.max_iter), ("max_fev", self.max_fev)] {
            if cap == Some(0) {
                return Err(OptimError::InvalidOption {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}
