//! Utility helpers
//!
//! ```
//! use datascience::util::{minimize, percentile};
//!
//! assert_eq!(percentile(50.0, &[3, 1, 2]).unwrap(), 2);
//! let x = minimize(|x: f64| (x + 1.0).powi(2), None).unwrap();
//! assert!((x.as_scalar().unwrap() + 1.0).abs() < 1e-4);
//! ```

pub use ds_data::{table_apply, ColumnFn, Table, Value};
pub use ds_optim::{minimize, Minimize, Minimum, Start};
#[allow(deprecated)]
pub use ds_plot::plot_cdf_area;
pub use ds_plot::{plot_normal_cdf, Canvas, Figure, SvgCanvas};
pub use ds_stats::{percentile, percentiles, Percentile, Percentiles};
