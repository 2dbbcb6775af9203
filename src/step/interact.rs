//! Pairwise interaction step.

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::series::Series;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// One interaction: the product of two existing numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPair {
    pub left: String,
    pub right: String,
}

/// Append pairwise products between two column groups, named
/// `<left>_x_<right>` in left-major order. Both selectors resolve at
/// prepare time against the running schema, so columns generated by
/// earlier steps (for example indicator columns) are selectable. Source
/// columns are kept; a missing value in either factor propagates.
#[derive(Debug, Clone)]
pub struct StepInteract {
    left: Selector,
    right: Selector,
}

impl StepInteract {
    pub fn new(left: Selector, right: Selector) -> Self {
        StepInteract { left, right }
    }
}

impl Step for StepInteract {
    fn name(&self) -> &str {
        "interact"
    }

    fn selector(&self) -> &Selector {
        &self.left
    }

    fn prepare(&self, _data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        let right_columns = ctx.resolve(&self.right)?;
        for name in ctx.columns().iter().chain(right_columns.iter()) {
            let field = ctx
                .schema()
                .field(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            if !field.dtype.is_numeric() {
                return Err(Error::ColumnTypeMismatch {
                    name: name.clone(),
                    expected: DataType::Float64,
                    found: field.dtype,
                });
            }
        }
        let mut pairs = Vec::new();
        for left in ctx.columns() {
            for right in &right_columns {
                if left != right {
                    pairs.push(InteractionPair {
                        left: left.clone(),
                        right: right.clone(),
                    });
                }
            }
        }
        if pairs.is_empty() {
            return Err(Error::InvalidInput(
                "interaction step produced no column pairs".to_string(),
            ));
        }
        Ok(StepState::Interact { pairs })
    }
}

pub(crate) fn apply_interact(data: &DataFrame, pairs: &[InteractionPair]) -> Result<DataFrame> {
    let mut result = data.clone();
    for pair in pairs {
        let left = result
            .column(&pair.left)
            .ok_or_else(|| Error::ColumnNotFound(pair.left.clone()))?;
        let right = result
            .column(&pair.right)
            .ok_or_else(|| Error::ColumnNotFound(pair.right.clone()))?;
        let values: Vec<Value> = left
            .iter()
            .zip(right.iter())
            .map(|(a, b)| match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Value::Float64(x * y),
                _ => Value::Na,
            })
            .collect();
        let product = Series::new(values, DataType::Float64)?;
        result.add_column(format!("{}_x_{}", pair.left, pair.right), product)?;
    }
    Ok(result)
}
