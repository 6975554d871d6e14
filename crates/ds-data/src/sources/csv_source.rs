//! Reading and writing tables as delimited text

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::ReaderBuilder;

use crate::config::CsvOptions;
use crate::schema::{detect_kind, parse_cell, ColumnKind};
use crate::{Table, TableError};

impl Table {
    /// Read a CSV file into a table
    pub fn read_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self, TableError> {
        let path = path.as_ref();
        tracing::debug!("Reading table from {}", path.display());
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file), options)
    }

    /// Read CSV records from any reader
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(options.has_header)
            .delimiter(options.delimiter)
            .from_reader(reader);

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }

        let headers: Vec<String> = if options.has_header {
            reader.headers()?.iter().map(|h| h.trim().to_string()).collect()
        } else {
            let width = records.first().map_or(0, |r| r.len());
            (1..=width).map(|i| format!("column_{i}")).collect()
        };

        let nulls = &options.null_config;
        let mut table = Table::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let cells = || records.iter().map(move |r| r.get(col_idx).unwrap_or(""));
            let kind = if options.infer_types {
                detect_kind(cells(), nulls)
            } else {
                ColumnKind::Text
            };
            let values: Vec<_> = cells().map(|cell| parse_cell(cell, kind, nulls)).collect();
            table = table.with_column(header.clone(), values)?;
        }

        tracing::debug!(
            "Loaded table with {} columns and {} rows",
            table.num_columns(),
            records.len()
        );
        Ok(table)
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let batch = self.to_df()?;
        let mut writer = arrow::csv::WriterBuilder::new().with_header(true).build(writer);
        writer.write(&batch)?;
        Ok(())
    }
}
