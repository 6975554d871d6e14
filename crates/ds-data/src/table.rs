//! Column-oriented table with an Arrow frame representation

use std::fmt;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use indexmap::IndexMap;

use crate::schema::{array_to_values, normalize_column, values_to_array};
use crate::{TableError, Value};

/// An ordered collection of uniquely named, row-aligned columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs
    pub fn from_columns<I, S, V>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, values)| table.with_column(name, values))
    }

    /// Append a column.
    ///
    /// Values are stored the way the frame represents them, so a column mixing
    /// integers and floats holds floats. Text mixed with other kinds is
    /// rejected.
    pub fn with_column<V>(mut self, name: impl Into<String>, values: V) -> Result<Self, TableError>
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let name = name.into();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && values.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.num_rows(),
                found: values.len(),
            });
        }

        let values = normalize_column(&name, values)?;
        self.columns.insert(name, values);
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Values of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.values().map(|column| &column[index]).collect())
    }

    /// Convert the table into an Arrow frame
    pub fn to_df(&self) -> Result<RecordBatch, TableError> {
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.columns.len());

        for (name, values) in &self.columns {
            let array = values_to_array(name, values)?;
            fields.push(Field::new(name, array.data_type().clone(), true));
            arrays.push(array);
        }

        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(batch)
    }

    /// Build a table from an Arrow frame
    pub fn from_df(batch: &RecordBatch) -> Result<Self, TableError> {
        let schema = batch.schema();
        let mut table = Self::new();
        for (field, array) in schema.fields().iter().zip(batch.columns()) {
            let values = array_to_values(field.name(), array.as_ref())?;
            table = table.with_column(field.name().clone(), values)?;
        }
        Ok(table)
    }
}

impl PartialEq for Table {
    // IndexMap equality ignores order; tables compare column order too
    fn eq(&self, other: &Self) -> bool {
        self.columns.len() == other.columns.len()
            && self.columns.iter().zip(other.columns.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let batch = self.to_df().map_err(|_| fmt::Error)?;
        let pretty = arrow::util::pretty::pretty_format_batches(&[batch]).map_err(|_| fmt::Error)?;
        write!(f, "{pretty}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns([
            ("x", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            ("y", vec![Value::Float(0.5), Value::Null, Value::Float(2.0)]),
            ("name", vec![Value::from("a"), Value::from("b"), Value::from("c")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_labels() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["x", "y", "name"]);
        assert_eq!(table.row(1).unwrap(), vec![&Value::Int(2), &Value::Null, &Value::from("b")]);
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_rejects_duplicate_and_ragged_columns() {
        let table = Table::new().with_column("a", [1, 2]).unwrap();
        assert!(matches!(
            table.clone().with_column("a", [3, 4]),
            Err(TableError::DuplicateColumn(name)) if name == "a"
        ));
        assert!(matches!(
            table.with_column("b", [1]),
            Err(TableError::LengthMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_frame_round_trip() {
        let table = sample();
        let df = table.to_df().unwrap();
        assert_eq!(df.num_rows(), 3);
        assert_eq!(df.schema().field(0).data_type(), &arrow::datatypes::DataType::Int64);
        assert_eq!(Table::from_df(&df).unwrap(), table);
    }

    #[test]
    fn test_mixed_numeric_column_is_stored_as_floats() {
        let table = Table::new()
            .with_column("m", vec![Value::Int(1), Value::Float(0.5)])
            .unwrap();
        assert_eq!(table.column("m").unwrap(), &[Value::Float(1.0), Value::Float(0.5)]);
        assert_eq!(Table::from_df(&table.to_df().unwrap()).unwrap(), table);

        let mixed = Table::new().with_column("t", vec![Value::Int(1), Value::from("a")]);
        assert!(matches!(mixed, Err(TableError::MixedColumn { .. })));
    }

    #[test]
    fn test_empty_table_frame() {
        let df = Table::new().to_df().unwrap();
        assert_eq!((df.num_rows(), df.num_columns()), (0, 0));
        assert_eq!(Table::from_df(&df).unwrap(), Table::new());
    }

    #[test]
    fn test_equality_respects_column_order() {
        let ab = Table::from_columns([("a", [1]), ("b", [2])]).unwrap();
        let ba = Table::from_columns([("b", [2]), ("a", [1])]).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_display_lists_columns() {
        let rendered = sample().to_string();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("0.5"));
    }
}
