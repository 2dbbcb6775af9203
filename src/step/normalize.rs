//! Numeric rescaling steps: center/scale and min-max range.

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// Learned location and spread of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMoments {
    pub column: String,
    pub mean: f64,
    pub std: f64,
}

/// Learned range of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBounds {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

/// Center and scale numeric columns to zero mean and unit standard
/// deviation, using moments learned from the training frame. A column
/// with zero spread maps to 0.0.
#[derive(Debug, Clone)]
pub struct StepNormalize {
    selector: Selector,
}

impl StepNormalize {
    pub fn new(selector: Selector) -> Self {
        StepNormalize { selector }
    }
}

impl Step for StepNormalize {
    fn name(&self) -> &str {
        "normalize"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        let mut moments = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            moments.push(ColumnMoments {
                column: name.clone(),
                mean: series.mean()?,
                std: series.std()?,
            });
        }
        Ok(StepState::Normalize { moments })
    }
}

pub(crate) fn apply_normalize(data: &DataFrame, moments: &[ColumnMoments]) -> Result<DataFrame> {
    let mut result = data.clone();
    for m in moments {
        let series = result
            .column(&m.column)
            .ok_or_else(|| Error::ColumnNotFound(m.column.clone()))?;
        let mapped = series.map(DataType::Float64, |v| match v.as_f64() {
            Some(x) => {
                if m.std > 0.0 {
                    Value::Float64((x - m.mean) / m.std)
                } else {
                    Value::Float64(0.0)
                }
            }
            None => Value::Na,
        })?;
        result.replace_column(&m.column, mapped)?;
    }
    Ok(result)
}

/// Rescale numeric columns to [0, 1] using bounds learned from the
/// training frame. A column with zero range maps to 0.5.
#[derive(Debug, Clone)]
pub struct StepRange {
    selector: Selector,
}

impl StepRange {
    pub fn new(selector: Selector) -> Self {
        StepRange { selector }
    }
}

impl Step for StepRange {
    fn name(&self) -> &str {
        "range"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        let mut bounds = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            bounds.push(ColumnBounds {
                column: name.clone(),
                min: series.min()?,
                max: series.max()?,
            });
        }
        Ok(StepState::Range { bounds })
    }
}

pub(crate) fn apply_range(data: &DataFrame, bounds: &[ColumnBounds]) -> Result<DataFrame> {
    let mut result = data.clone();
    for b in bounds {
        let range = b.max - b.min;
        let series = result
            .column(&b.column)
            .ok_or_else(|| Error::ColumnNotFound(b.column.clone()))?;
        let mapped = series.map(DataType::Float64, |v| match v.as_f64() {
            Some(x) => {
                if range > 0.0 {
                    Value::Float64((x - b.min) / range)
                } else {
                    Value::Float64(0.5)
                }
            }
            None => Value::Na,
        })?;
        result.replace_column(&b.column, mapped)?;
    }
    Ok(result)
}
