//! Data science teaching helpers
//!
//! The [`util`] module collects the everyday helpers: nearest-rank
//! percentiles, shaded normal curves, column-wise table transforms and a
//! forgiving function minimizer. The component crates are re-exported for
//! finer control.

pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use ds_data as data;
pub use ds_optim as optim;
pub use ds_plot as plot;
pub use ds_stats as stats;

pub use config::Settings;
pub use error::{Error, Result};
