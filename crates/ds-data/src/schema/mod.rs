//! Column type detection and conversion between values and Arrow arrays

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, NullArray, StringArray,
};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt8Type,
};

use crate::config::NullConfig;
use crate::{TableError, Value};

/// Infer the Arrow type able to hold every value of a column.
///
/// Integers are widened to floats when both occur. Text only combines with
/// nulls.
pub fn infer_data_type(column: &str, values: &[Value]) -> Result<DataType, TableError> {
    let mut has_bool = false;
    let mut has_int = false;
    let mut has_float = false;
    let mut has_text = false;

    for value in values {
        match value {
            Value::Null => {}
            Value::Bool(_) => has_bool = true,
            Value::Int(_) => has_int = true,
            Value::Float(_) => has_float = true,
            Value::Text(_) => has_text = true,
        }
    }

    let numeric = has_int || has_float;
    if (has_text && (numeric || has_bool)) || (has_bool && numeric) {
        return Err(TableError::MixedColumn { column: column.to_string() });
    }

    Ok(if has_text {
        DataType::Utf8
    } else if has_float {
        DataType::Float64
    } else if has_int {
        DataType::Int64
    } else if has_bool {
        DataType::Boolean
    } else {
        DataType::Null
    })
}

/// Rewrite a column so every value has the representation its Arrow type
/// reads back as; integers in a float column become floats.
pub fn normalize_column(column: &str, values: Vec<Value>) -> Result<Vec<Value>, TableError> {
    if infer_data_type(column, &values)? != DataType::Float64 {
        return Ok(values);
    }
    Ok(values
        .into_iter()
        .map(|value| match value {
            Value::Int(v) => Value::Float(v as f64),
            other => other,
        })
        .collect())
}

/// Build an Arrow array from a column of values
pub fn values_to_array(column: &str, values: &[Value]) -> Result<ArrayRef, TableError> {
    let array: ArrayRef = match infer_data_type(column, values)? {
        DataType::Utf8 => Arc::new(StringArray::from(
            values.iter().map(|v| v.as_str().map(str::to_string)).collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            values.iter().map(Value::as_f64).collect::<Vec<_>>(),
        )),
        DataType::Int64 => Arc::new(Int64Array::from(
            values.iter().map(Value::as_i64).collect::<Vec<_>>(),
        )),
        DataType::Boolean => Arc::new(BooleanArray::from(
            values.iter().map(Value::as_bool).collect::<Vec<_>>(),
        )),
        _ => Arc::new(NullArray::new(values.len())),
    };
    Ok(array)
}

/// Read every cell of an Arrow array back into values
pub fn array_to_values(column: &str, array: &dyn Array) -> Result<Vec<Value>, TableError> {
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; array.len()],
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(Value::from)
            .collect(),
        DataType::Int8 => primitive_values::<Int8Type>(array, |v| Value::Int(v as i64)),
        DataType::Int16 => primitive_values::<Int16Type>(array, |v| Value::Int(v as i64)),
        DataType::Int32 => primitive_values::<Int32Type>(array, |v| Value::Int(v as i64)),
        DataType::Int64 => primitive_values::<Int64Type>(array, Value::Int),
        DataType::UInt8 => primitive_values::<UInt8Type>(array, |v| Value::Int(v as i64)),
        DataType::UInt16 => primitive_values::<UInt16Type>(array, |v| Value::Int(v as i64)),
        DataType::UInt32 => primitive_values::<UInt32Type>(array, |v| Value::Int(v as i64)),
        DataType::Float32 => primitive_values::<Float32Type>(array, |v| Value::Float(v as f64)),
        DataType::Float64 => primitive_values::<Float64Type>(array, Value::Float),
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(Value::from)
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(Value::from)
            .collect(),
        other => {
            return Err(TableError::UnsupportedType {
                column: column.to_string(),
                data_type: other.clone(),
            })
        }
    };
    Ok(values)
}

fn primitive_values<T>(array: &dyn Array, convert: impl Fn(T::Native) -> Value) -> Vec<Value>
where
    T: arrow::datatypes::ArrowPrimitiveType,
{
    array
        .as_primitive::<T>()
        .iter()
        .map(|v| v.map(&convert).unwrap_or(Value::Null))
        .collect()
}

/// Kind of a text column detected from its raw cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Empty,
    Bool,
    Int,
    Float,
    Text,
}

/// Detect the narrowest kind that parses every non-null cell
pub fn detect_kind<'a>(cells: impl IntoIterator<Item = &'a str>, nulls: &NullConfig) -> ColumnKind {
    let mut seen = false;
    let mut is_int = true;
    let mut is_float = true;
    let mut is_bool = true;

    for cell in cells {
        if nulls.is_null(cell) {
            continue;
        }
        seen = true;
        let cell = cell.trim();
        if is_int && cell.parse::<i64>().is_err() {
            is_int = false;
        }
        if is_float && cell.parse::<f64>().is_err() {
            is_float = false;
        }
        if is_bool && parse_bool(cell).is_none() {
            is_bool = false;
        }
    }

    if !seen {
        ColumnKind::Empty
    } else if is_int {
        ColumnKind::Int
    } else if is_float {
        ColumnKind::Float
    } else if is_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

/// Parse one raw cell as the given kind
pub fn parse_cell(cell: &str, kind: ColumnKind, nulls: &NullConfig) -> Value {
    if nulls.is_null(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    match kind {
        ColumnKind::Empty => Value::Null,
        ColumnKind::Int => trimmed.parse().map(Value::Int).unwrap_or(Value::Null),
        ColumnKind::Float => trimmed.parse().map(Value::Float).unwrap_or(Value::Null),
        ColumnKind::Bool => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
        ColumnKind::Text => Value::Text(cell.to_string()),
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
