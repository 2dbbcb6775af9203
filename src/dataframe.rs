//! Ordered, row-aligned collections of named columns.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{Field, Schema};
use crate::series::Series;
use crate::value::Value;

/// A tabular dataset: named columns in declaration order, all of equal
/// length. Rows are independent samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl DataFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        DataFrame {
            columns: Vec::new(),
        }
    }

    /// Build a frame from named series. Every series must carry a name.
    pub fn from_columns(columns: Vec<Series>) -> Result<Self> {
        let mut df = DataFrame::new();
        for series in columns {
            let name = series
                .name()
                .ok_or_else(|| Error::InvalidInput("column has no name".to_string()))?
                .to_string();
            df.add_column(name, series)?;
        }
        Ok(df)
    }

    /// Append a column. Fails on a duplicate name or a row-count mismatch
    /// with the columns already present.
    pub fn add_column(&mut self, name: impl Into<String>, mut series: Series) -> Result<()> {
        let name = name.into();
        if self.contains_column(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        if !self.columns.is_empty() && series.len() != self.nrows() {
            return Err(Error::InconsistentRowCount {
                expected: self.nrows(),
                found: series.len(),
            });
        }
        series.set_name(name);
        self.columns.push(series);
        Ok(())
    }

    /// Replace an existing column in place, keeping its position.
    pub fn replace_column(&mut self, name: &str, mut series: Series) -> Result<()> {
        if series.len() != self.nrows() {
            return Err(Error::InconsistentRowCount {
                expected: self.nrows(),
                found: series.len(),
            });
        }
        let index = self
            .position(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        series.set_name(name);
        self.columns[index] = series;
        Ok(())
    }

    /// Remove and return a column.
    pub fn drop_column(&mut self, name: &str) -> Result<Series> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(self.columns.remove(index))
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|s| s.name().unwrap_or_default().to_string())
            .collect()
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |s| s.len())
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// A cell by row index and column name.
    pub fn get_value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|s| s.get(row))
    }

    /// Snapshot of the current column names and types.
    pub fn schema(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .map(|s| Field::new(s.name().unwrap_or_default(), s.dtype()))
                .collect(),
        )
    }

    /// Projection to the given columns, in the given order.
    pub fn select(&self, names: &[String]) -> Result<DataFrame> {
        let mut df = DataFrame::new();
        for name in names {
            let series = self
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            df.add_column(name.clone(), series.clone())?;
        }
        Ok(df)
    }

    /// Row subset by index, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<DataFrame> {
        let nrows = self.nrows();
        for &index in indices {
            if index >= nrows {
                return Err(Error::IndexOutOfBounds { index, size: nrows });
            }
        }
        let mut df = DataFrame::new();
        for series in &self.columns {
            let values = indices
                .iter()
                .map(|&i| series.values()[i].clone())
                .collect();
            let taken = Series::new(values, series.dtype())?;
            df.add_column(series.name().unwrap_or_default(), taken)?;
        }
        Ok(df)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|s| s.name() == Some(name))
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DataFrame [{} rows x {} columns]", self.nrows(), self.ncols())?;
        if self.columns.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", self.column_names().join("\t"))?;
        let preview = self.nrows().min(10);
        for row in 0..preview {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|s| s.values()[row].to_string())
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        if self.nrows() > preview {
            writeln!(f, "... ({} more rows)", self.nrows() - preview)?;
        }
        Ok(())
    }
}
