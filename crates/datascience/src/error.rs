use thiserror::Error;

use ds_data::TableError;
use ds_optim::OptimError;
use ds_plot::PlotError;
use ds_stats::StatsError;

/// Any error raised by the toolkit
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Optim(#[from] OptimError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
