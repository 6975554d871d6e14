//! Column-wise function application over tables

use std::fmt;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{Field, FieldRef, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::schema::{array_to_values, values_to_array};
use crate::{Table, TableError, Value};

/// A function applied to table columns.
///
/// `Map` transforms each value and keeps the table's shape. `Reduce`
/// summarizes a whole column into one value, so applying it to every column
/// yields a single-row table.
pub enum ColumnFn<'a> {
    Map(Box<dyn Fn(&Value) -> Value + 'a>),
    Reduce(Box<dyn Fn(&[Value]) -> Value + 'a>),
}

impl<'a> ColumnFn<'a> {
    pub fn map(f: impl Fn(&Value) -> Value + 'a) -> Self {
        ColumnFn::Map(Box::new(f))
    }

    pub fn reduce(f: impl Fn(&[Value]) -> Value + 'a) -> Self {
        ColumnFn::Reduce(Box::new(f))
    }

    /// Apply to a single value; a reducer sees it as a one-element column
    pub fn apply_value(&self, value: &Value) -> Value {
        match self {
            ColumnFn::Map(f) => f(value),
            ColumnFn::Reduce(f) => f(std::slice::from_ref(value)),
        }
    }
}

impl fmt::Debug for ColumnFn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnFn::Map(_) => f.write_str("ColumnFn::Map"),
            ColumnFn::Reduce(_) => f.write_str("ColumnFn::Reduce"),
        }
    }
}

/// Applies `func` to columns of `table` and returns a new table.
///
/// With a `subset`, only the named columns are mapped value by value, in the
/// order given; every name must exist or the call fails naming exactly the
/// missing columns. Without one, `func` is applied to every column and the
/// result either keeps the table's shape or, for a reducer, becomes a single
/// row with one value per original column.
pub fn table_apply(table: &Table, func: &ColumnFn<'_>, subset: Option<&[&str]>) -> Result<Table, TableError> {
    let df = table.to_df()?;

    let df = match subset {
        Some(subset) => apply_subset(&df, func, subset)?,
        None => apply_all(&df, func)?,
    };

    Table::from_df(&df)
}

fn apply_subset(df: &RecordBatch, func: &ColumnFn<'_>, subset: &[&str]) -> Result<RecordBatch, TableError> {
    let schema = df.schema();

    let missing: Vec<String> = subset
        .iter()
        .filter(|name| schema.index_of(name).is_err())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::ColumnMismatch(missing));
    }

    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = df.columns().to_vec();

    for &name in subset {
        let index = schema.index_of(name)?;
        let mapped: Vec<Value> = array_to_values(name, columns[index].as_ref())?
            .iter()
            .map(|value| func.apply_value(value))
            .collect();
        let array = values_to_array(name, &mapped)?;
        fields[index] = Arc::new(Field::new(name, array.data_type().clone(), true));
        columns[index] = array;
    }

    tracing::debug!(columns = ?subset, "applied function to column subset");
    rebuild(fields, columns, df.num_rows())
}

fn apply_all(df: &RecordBatch, func: &ColumnFn<'_>) -> Result<RecordBatch, TableError> {
    let schema = df.schema();

    if let ColumnFn::Reduce(reduce) = func {
        // One value per column, indexed by column name
        let mut summary = Vec::with_capacity(df.num_columns());
        for (field, array) in schema.fields().iter().zip(df.columns()) {
            let values = array_to_values(field.name(), array.as_ref())?;
            summary.push((field.name().clone(), reduce(&values)));
        }
        tracing::debug!(columns = summary.len(), "reduced every column to a single row");
        return single_row(summary);
    }

    let mut fields = Vec::with_capacity(df.num_columns());
    let mut columns = Vec::with_capacity(df.num_columns());
    for (field, array) in schema.fields().iter().zip(df.columns()) {
        let mapped: Vec<Value> = array_to_values(field.name(), array.as_ref())?
            .iter()
            .map(|value| func.apply_value(value))
            .collect();
        let array = values_to_array(field.name(), &mapped)?;
        fields.push(Arc::new(Field::new(field.name(), array.data_type().clone(), true)));
        columns.push(array);
    }
    rebuild(fields, columns, df.num_rows())
}

/// Reshape a per-column summary into a one-row frame keeping column order
fn single_row(summary: Vec<(String, Value)>) -> Result<RecordBatch, TableError> {
    let mut fields = Vec::with_capacity(summary.len());
    let mut columns = Vec::with_capacity(summary.len());
    for (name, value) in summary {
        let array = values_to_array(&name, std::slice::from_ref(&value))?;
        fields.push(Arc::new(Field::new(name, array.data_type().clone(), true)));
        columns.push(array);
    }
    rebuild(fields, columns, 1)
}

fn rebuild(fields: Vec<FieldRef>, columns: Vec<ArrayRef>, rows: usize) -> Result<RecordBatch, TableError> {
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns([
            ("a", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            ("b", vec![Value::Float(0.5), Value::Float(1.5), Value::Null]),
            ("c", vec![Value::from("x"), Value::from("y"), Value::from("z")]),
        ])
        .unwrap()
    }

    fn double(value: &Value) -> Value {
        match value {
            Value::Int(v) => Value::Int(v * 2),
            Value::Float(v) => Value::Float(v * 2.0),
            other => other.clone(),
        }
    }

    fn sum(values: &[Value]) -> Value {
        Value::Float(values.iter().filter_map(Value::as_f64).sum())
    }

    #[test]
    fn test_identity_round_trip() {
        let table = sample();
        let result = table_apply(&table, &ColumnFn::map(Value::clone), None).unwrap();
        assert_eq!(result, table);

        let mixed = Table::from_columns([("m", vec![Value::Int(1), Value::Float(0.5), Value::Null])]).unwrap();
        let result = table_apply(&mixed, &ColumnFn::map(Value::clone), None).unwrap();
        assert_eq!(result, mixed);
    }

    #[test]
    fn test_empty_table() {
        let empty = Table::new();
        let mapped = table_apply(&empty, &ColumnFn::map(double), None).unwrap();
        assert_eq!(mapped, empty);

        let reduced = table_apply(&empty, &ColumnFn::reduce(sum), None).unwrap();
        assert_eq!(reduced.num_columns(), 0);

        let no_rows = Table::new().with_column("a", Vec::<Value>::new()).unwrap();
        let mapped = table_apply(&no_rows, &ColumnFn::map(double), Some(&["a"][..])).unwrap();
        assert_eq!(mapped.num_rows(), 0);
        assert_eq!(mapped.labels().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_subset_only_touches_named_columns() {
        let table = sample();
        let result = table_apply(&table, &ColumnFn::map(double), Some(&["b"][..])).unwrap();
        assert_eq!(result.column("a"), table.column("a"));
        assert_eq!(
            result.column("b").unwrap(),
            &[Value::Float(1.0), Value::Float(3.0), Value::Null]
        );
        assert_eq!(result.labels().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_subset_can_change_column_type() {
        let table = sample();
        let to_text = ColumnFn::map(|v: &Value| Value::Text(format!("#{v}")));
        let result = table_apply(&table, &to_text, Some(&["a"][..])).unwrap();
        assert_eq!(result.column("a").unwrap()[0], Value::from("#1"));
    }

    #[test]
    fn test_subset_mismatch_lists_missing_names() {
        let table = sample();
        let err = table_apply(&table, &ColumnFn::map(double), Some(&["a", "nope", "b", "gone"][..])).unwrap_err();
        match &err {
            TableError::ColumnMismatch(names) => assert_eq!(names, &vec!["nope".to_string(), "gone".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), r#"Column mismatch: ["nope", "gone"]"#);
    }

    #[test]
    fn test_reducer_collapses_to_single_row() {
        let numeric = Table::from_columns([
            ("a", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            ("b", vec![Value::Float(0.5), Value::Float(1.5), Value::Null]),
            ("d", vec![Value::Float(1.0); 3]),
        ])
        .unwrap();

        let result = table_apply(&numeric, &ColumnFn::reduce(sum), None).unwrap();
        assert_eq!(result.num_rows(), 1);
        assert_eq!(result.num_columns(), numeric.num_columns());
        assert_eq!(result.labels().collect::<Vec<_>>(), vec!["a", "b", "d"]);
        assert_eq!(result.column("a").unwrap(), &[Value::Float(6.0)]);
        assert_eq!(result.column("b").unwrap(), &[Value::Float(2.0)]);
    }

    #[test]
    fn test_reducer_on_subset_sees_single_values() {
        let table = sample();
        let result = table_apply(&table, &ColumnFn::reduce(sum), Some(&["a"][..])).unwrap();
        assert_eq!(result.num_rows(), 3);
        assert_eq!(
            result.column("a").unwrap(),
            &[Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)]
        );
    }

    #[test]
    fn test_original_table_is_untouched() {
        let table = sample();
        let before = table.clone();
        let _ = table_apply(&table, &ColumnFn::map(double), None).unwrap();
        assert_eq!(table, before);
    }
}
