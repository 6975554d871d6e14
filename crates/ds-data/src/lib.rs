//! Tables, their Arrow frame representation and column-wise transforms

pub mod apply;
pub mod config;
pub mod schema;
pub mod sources;
pub mod table;
pub mod value;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use apply::{table_apply, ColumnFn};
pub use config::{CsvOptions, NullConfig};
pub use table::Table;
pub use value::Value;

/// Errors that can occur in table operations
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column mismatch: {0:?}")]
    ColumnMismatch(Vec<String>),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' mixes text with non-text values")]
    MixedColumn { column: String },

    #[error("Unsupported type {data_type} in column '{column}'")]
    UnsupportedType { column: String, data_type: DataType },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),
}

impl From<csv::Error> for TableError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => TableError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => TableError::Csv(error.to_string()),
        }
    }
}
