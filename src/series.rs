//! One-dimensional column of values.
//!
//! A [`Series`] pairs an optional name with a dtype-checked vector of
//! [`Value`] cells. The reductions exposed here (moments, order statistics,
//! level counts) are exactly the ones step preparation learns from.

use std::collections::HashMap;

use chrono::NaiveDate;
use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::{DataType, Value};

/// A named column of homogeneous values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: Option<String>,
    dtype: DataType,
    values: Vec<Value>,
}

impl Series {
    /// Create a series with an explicit dtype. Every element must be `Na`
    /// or match `dtype`.
    pub fn new(values: Vec<Value>, dtype: DataType) -> Result<Self> {
        for value in &values {
            if let Some(found) = value.data_type() {
                if found != dtype {
                    return Err(Error::InvalidInput(format!(
                        "value {} does not match series dtype {}",
                        value, dtype
                    )));
                }
            }
        }
        Ok(Series {
            name: None,
            dtype,
            values,
        })
    }

    /// Create a series, inferring the dtype from the first non-missing
    /// value. An all-missing vector infers `Float64`.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let dtype = values
            .iter()
            .find_map(|v| v.data_type())
            .unwrap_or(DataType::Float64);
        Series::new(values, dtype)
    }

    /// Float series from any castable numeric slice.
    pub fn from_numeric<T: NumCast + Copy>(values: &[T]) -> Self {
        let values = values
            .iter()
            .map(|v| match NumCast::from(*v) {
                Some(f) => Value::Float64(f),
                None => Value::Na,
            })
            .collect();
        Series {
            name: None,
            dtype: DataType::Float64,
            values,
        }
    }

    /// Integer series.
    pub fn from_i64(values: &[i64]) -> Self {
        Series {
            name: None,
            dtype: DataType::Int64,
            values: values.iter().map(|v| Value::Int64(*v)).collect(),
        }
    }

    /// String series.
    pub fn from_strings<S: AsRef<str>>(values: &[S]) -> Self {
        Series {
            name: None,
            dtype: DataType::Str,
            values: values
                .iter()
                .map(|v| Value::Str(v.as_ref().to_string()))
                .collect(),
        }
    }

    /// Boolean series.
    pub fn from_bools(values: &[bool]) -> Self {
        Series {
            name: None,
            dtype: DataType::Bool,
            values: values.iter().map(|v| Value::Bool(*v)).collect(),
        }
    }

    /// Date series.
    pub fn from_dates(values: &[NaiveDate]) -> Self {
        Series {
            name: None,
            dtype: DataType::Date,
            values: values.iter().map(|v| Value::Date(*v)).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Element-wise transform producing a series of the given dtype. The
    /// name is carried over.
    pub fn map<F>(&self, dtype: DataType, mut f: F) -> Result<Series>
    where
        F: FnMut(&Value) -> Value,
    {
        let values = self.values.iter().map(|v| f(v)).collect();
        let mut out = Series::new(values, dtype)?;
        out.name = self.name.clone();
        Ok(out)
    }

    fn require_numeric(&self) -> Result<()> {
        if !self.dtype.is_numeric() {
            return Err(Error::ColumnTypeMismatch {
                name: self.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                expected: DataType::Float64,
                found: self.dtype,
            });
        }
        Ok(())
    }

    /// Non-missing values as `f64`, in order.
    pub fn numeric_values(&self) -> Result<Vec<f64>> {
        self.require_numeric()?;
        Ok(self.values.iter().filter_map(|v| v.as_f64()).collect())
    }

    /// Arithmetic mean over non-missing values.
    pub fn mean(&self) -> Result<f64> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Err(Error::EmptyData(self.describe_for_error()));
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator) over non-missing
    /// values. Fewer than two observations yield 0.0.
    pub fn std(&self) -> Result<f64> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Err(Error::EmptyData(self.describe_for_error()));
        }
        if values.len() < 2 {
            return Ok(0.0);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        Ok(var.sqrt())
    }

    /// Minimum over non-missing values.
    pub fn min(&self) -> Result<f64> {
        let values = self.numeric_values()?;
        values
            .into_iter()
            .fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |a| a.min(v)))
            })
            .ok_or_else(|| Error::EmptyData(self.describe_for_error()))
    }

    /// Maximum over non-missing values.
    pub fn max(&self) -> Result<f64> {
        let values = self.numeric_values()?;
        values
            .into_iter()
            .fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |a| a.max(v)))
            })
            .ok_or_else(|| Error::EmptyData(self.describe_for_error()))
    }

    pub fn median(&self) -> Result<f64> {
        self.quantile(0.5)
    }

    /// Quantile with linear interpolation between order statistics.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(Error::InvalidInput(format!(
                "quantile must be in [0, 1], got {}",
                q
            )));
        }
        let mut values = self.numeric_values()?;
        if values.is_empty() {
            return Err(Error::EmptyData(self.describe_for_error()));
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len();
        let h = (n - 1) as f64 * q;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        Ok(values[lo] + (h - lo as f64) * (values[hi] - values[lo]))
    }

    /// Occurrence counts per nominal level, missing values excluded.
    pub fn level_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for value in &self.values {
            if let Some(level) = value.as_level() {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Sorted distinct nominal levels, missing values excluded.
    pub fn levels(&self) -> Vec<String> {
        let mut levels: Vec<String> = self.level_counts().into_keys().collect();
        levels.sort();
        levels
    }

    fn describe_for_error(&self) -> String {
        format!(
            "series '{}' has no non-missing values",
            self.name.as_deref().unwrap_or("<unnamed>")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() -> Result<()> {
        let s = Series::from_numeric(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.quantile(0.0)?, 1.0);
        assert_eq!(s.quantile(1.0)?, 4.0);
        assert_eq!(s.quantile(0.5)?, 2.5);
        Ok(())
    }

    #[test]
    fn std_is_sample_deviation() -> Result<()> {
        let s = Series::from_numeric(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.std()? - 2.138089935299395).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn levels_are_sorted_and_distinct() {
        let s = Series::from_strings(&["b", "a", "b", "c"]);
        assert_eq!(s.levels(), vec!["a", "b", "c"]);
        assert_eq!(s.level_counts().get("b"), Some(&2));
    }

    #[test]
    fn na_is_skipped_by_reductions() -> Result<()> {
        let s = Series::new(
            vec![Value::Float64(1.0), Value::Na, Value::Float64(3.0)],
            DataType::Float64,
        )?;
        assert_eq!(s.mean()?, 2.0);
        assert_eq!(s.len(), 3);
        Ok(())
    }

    #[test]
    fn dtype_is_enforced() {
        let result = Series::new(vec![Value::Str("x".into())], DataType::Float64);
        assert!(result.is_err());
    }
}
