//! Loading configuration for tables

pub mod null_handling;

use serde::{Deserialize, Serialize};

pub use null_handling::NullConfig;

/// Options for reading delimited text into a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Whether the first record holds column names
    pub has_header: bool,

    /// Field delimiter
    pub delimiter: u8,

    /// Detect numeric and boolean columns; otherwise every column is text
    pub infer_types: bool,

    /// Null value handling
    pub null_config: NullConfig,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            infer_types: true,
            null_config: NullConfig::default(),
        }
    }
}
