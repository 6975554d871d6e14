//! Table sources

pub mod csv_source;
