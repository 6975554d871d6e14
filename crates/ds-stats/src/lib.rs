//! Descriptive statistics helpers for the datascience toolkit

pub mod percentile;

use thiserror::Error;

// Re-exports
pub use percentile::{percentile, percentiles, Percentile, Percentiles};

/// Errors that can occur in statistics operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Percentile requires a percent: got {0}")]
    NotAPercent(f64),

    #[error("Cannot compute a statistic of an empty sequence")]
    EmptyInput,
}
