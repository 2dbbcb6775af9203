//! Scalar cell values and column data types.
//!
//! Missing data is represented by an explicit [`Value::Na`] marker rather
//! than `Option`, so a column is always a homogeneous `Vec<Value>` in which
//! every element is either `Na` or matches the column's [`DataType`].

use std::fmt::{self, Display};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit floating point
    Float64,
    /// 64-bit signed integer
    Int64,
    /// UTF-8 string (categorical / text)
    Str,
    /// Boolean
    Bool,
    /// Calendar date (no time component)
    Date,
}

impl DataType {
    /// Whether the type participates in numeric transforms.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Float64 | DataType::Int64)
    }

    /// Whether the type is treated as nominal (level-based) by encoders.
    pub fn is_nominal(&self) -> bool {
        matches!(self, DataType::Str | DataType::Bool)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Float64 => "float64",
            DataType::Int64 => "int64",
            DataType::Str => "str",
            DataType::Bool => "bool",
            DataType::Date => "date",
        };
        write!(f, "{}", name)
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Float64(f64),
    Int64(i64),
    Str(String),
    Bool(bool),
    Date(NaiveDate),
    /// Missing value
    Na,
}

impl Value {
    pub fn is_na(&self) -> bool {
        matches!(self, Value::Na)
    }

    /// The data type of the value, or `None` for `Na`.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Float64(_) => Some(DataType::Float64),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Str(_) => Some(DataType::Str),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Date(_) => Some(DataType::Date),
            Value::Na => None,
        }
    }

    /// Numeric view of the value. `Int64` widens to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Nominal level label for encoders: strings verbatim, booleans as
    /// `"true"` / `"false"`.
    pub fn as_level(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float64(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d),
            Value::Na => write!(f, "NA"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}
