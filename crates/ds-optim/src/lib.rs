//! Function minimization with derivative-free and quasi-Newton methods
//!
//! [`minimize`] adapts closures of one or more scalar arguments, or of a
//! single vector argument, to the [`solver`] and shapes the result the way
//! the caller's start point was shaped.
//!
//! ```
//! use ds_optim::minimize;
//!
//! let x = minimize(|x: f64| (x - 3.0).powi(2), None).unwrap();
//! assert!((x.as_scalar().unwrap() - 3.0).abs() < 1e-4);
//! ```

pub mod minimize;
pub mod objective;
pub mod options;
pub mod result;
pub mod solver;

use thiserror::Error;

// Re-exports
pub use minimize::{minimize, Minimize, Minimum, Start};
pub use objective::{Arity, Objective};
pub use options::{Method, MinimizeOptions};
pub use result::{ConvergenceStatus, OptimizeResult};

/// Errors that can occur while setting up a minimization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    #[error("Please pass starting values explicitly when array=True")]
    StartRequired,

    #[error("Please pass starting values explicitly for variadic functions")]
    UnknownArity,

    #[error("Objective takes {expected} arguments but the start point has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Start point must have at least one element")]
    EmptyStart,

    #[error("Start point contains a non-finite value: {0:?}")]
    NonFiniteStart(Vec<f64>),

    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("Unknown method: {0}")]
    UnknownMethod(String),
}
