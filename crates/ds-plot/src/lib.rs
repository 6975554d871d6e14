//! Normal curve plotting with shaded cumulative areas

pub mod canvas;
pub mod config;
pub mod figure;
pub mod normal;

use thiserror::Error;

// Re-exports
pub use canvas::{Canvas, SvgCanvas, SvgFileCanvas};
pub use config::{PlotConfig, Rgb};
pub use figure::{Curve, Figure, FilledRegion, RegionKind};
#[allow(deprecated)]
pub use normal::{plot_cdf_area, plot_normal_cdf, NormalCurve};

/// Errors that can occur while laying out or rendering a plot
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),

    #[error("Shading bound must be finite, got {0}")]
    InvalidBound(f64),

    #[error("Shaded interval is empty: {lbound} > {rbound}")]
    EmptyInterval { lbound: f64, rbound: f64 },

    #[error("Invalid plot configuration: {0}")]
    Config(String),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
