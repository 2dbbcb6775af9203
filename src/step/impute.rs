//! Missing-value imputation step.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::series::Series;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// How the fill value for a column is learned.
#[derive(Debug, Clone, PartialEq)]
pub enum ImputeStrategy {
    /// Mean of the training column (numeric only).
    Mean,
    /// Median of the training column (numeric only).
    Median,
    /// Most frequent training value; ties break toward the smaller value.
    MostFrequent,
    /// A fixed value supplied up front.
    Constant(Value),
}

/// Learned fill value for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    pub value: Value,
}

/// Replace missing values using a fill learned from the training frame.
/// Non-missing values pass through unchanged, except that a fractional
/// fill widens an integer column to float.
#[derive(Debug, Clone)]
pub struct StepImpute {
    selector: Selector,
    strategy: ImputeStrategy,
}

impl StepImpute {
    pub fn new(selector: Selector, strategy: ImputeStrategy) -> Self {
        StepImpute { selector, strategy }
    }

    fn most_frequent(series: &Series) -> Option<Value> {
        let mut counts: HashMap<String, (Value, usize)> = HashMap::new();
        for value in series.iter() {
            if value.is_na() {
                continue;
            }
            let entry = counts
                .entry(value.to_string())
                .or_insert_with(|| (value.clone(), 0));
            entry.1 += 1;
        }
        counts
            .into_iter()
            .max_by(|(ka, (_, ca)), (kb, (_, cb))| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(_, (value, _))| value)
    }
}

impl Step for StepImpute {
    fn name(&self) -> &str {
        "impute"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        let mut fills = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            let value = match &self.strategy {
                ImputeStrategy::Mean => Value::Float64(series.mean()?),
                ImputeStrategy::Median => Value::Float64(series.median()?),
                ImputeStrategy::MostFrequent => Self::most_frequent(series)
                    .ok_or_else(|| {
                        Error::EmptyData(format!("column '{}' has no non-missing values", name))
                    })?,
                ImputeStrategy::Constant(value) => {
                    let found = value.data_type().ok_or_else(|| {
                        Error::InvalidInput("constant fill value must not be NA".to_string())
                    })?;
                    let expected = series.dtype();
                    if found != expected && !(found.is_numeric() && expected.is_numeric()) {
                        return Err(Error::ColumnTypeMismatch {
                            name: name.clone(),
                            expected,
                            found,
                        });
                    }
                    value.clone()
                }
            };
            fills.push(ColumnFill {
                column: name.clone(),
                value,
            });
        }
        Ok(StepState::Impute { fills })
    }
}

pub(crate) fn apply_impute(data: &DataFrame, fills: &[ColumnFill]) -> Result<DataFrame> {
    let mut result = data.clone();
    for fill in fills {
        let series = result
            .column(&fill.column)
            .ok_or_else(|| Error::ColumnNotFound(fill.column.clone()))?;
        let fill_dtype = fill.value.data_type().ok_or_else(|| {
            Error::InvalidInput("fill value must not be NA".to_string())
        })?;
        let col_dtype = series.dtype();
        let target = if fill_dtype == col_dtype {
            col_dtype
        } else if fill_dtype.is_numeric() && col_dtype.is_numeric() {
            DataType::Float64
        } else {
            return Err(Error::ColumnTypeMismatch {
                name: fill.column.clone(),
                expected: col_dtype,
                found: fill_dtype,
            });
        };
        let mapped = series.map(target, |v| {
            let chosen = if v.is_na() { &fill.value } else { v };
            if target == DataType::Float64 {
                match chosen.as_f64() {
                    Some(x) => Value::Float64(x),
                    None => Value::Na,
                }
            } else {
                chosen.clone()
            }
        })?;
        result.replace_column(&fill.column, mapped)?;
    }
    Ok(result)
}
