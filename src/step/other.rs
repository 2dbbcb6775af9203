//! Infrequent-level collapsing step.

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// Levels of one column that survived the frequency threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedLevels {
    pub column: String,
    pub levels: Vec<String>,
}

/// Collapse string levels whose training-frequency proportion falls below
/// a threshold into a single bucket level. The threshold is evaluated
/// against the training distribution only; at apply time any value not in
/// the retained set — including levels never seen in training — maps to
/// the bucket.
#[derive(Debug, Clone)]
pub struct StepOther {
    selector: Selector,
    threshold: f64,
    label: String,
}

impl StepOther {
    pub fn new(selector: Selector) -> Self {
        StepOther {
            selector,
            threshold: 0.05,
            label: "other".to_string(),
        }
    }

    /// Minimum training proportion a level needs to survive.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Label of the bucket level.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Step for StepOther {
    fn name(&self) -> &str {
        "other"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(Error::InvalidInput(format!(
                "collapse threshold must be in [0, 1), got {}",
                self.threshold
            )));
        }
        let mut retained = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            if series.dtype() != DataType::Str {
                return Err(Error::ColumnTypeMismatch {
                    name: name.clone(),
                    expected: DataType::Str,
                    found: series.dtype(),
                });
            }
            let counts = series.level_counts();
            let total: usize = counts.values().sum();
            if total == 0 {
                return Err(Error::EmptyData(format!(
                    "column '{}' has no non-missing values",
                    name
                )));
            }
            let mut levels: Vec<String> = counts
                .into_iter()
                .filter(|(_, count)| *count as f64 / total as f64 >= self.threshold)
                .map(|(level, _)| level)
                .collect();
            levels.sort();
            retained.push(RetainedLevels {
                column: name.clone(),
                levels,
            });
        }
        Ok(StepState::Other {
            retained,
            label: self.label.clone(),
        })
    }
}

pub(crate) fn apply_other(
    data: &DataFrame,
    retained: &[RetainedLevels],
    label: &str,
) -> Result<DataFrame> {
    let mut result = data.clone();
    for kept in retained {
        let series = result
            .column(&kept.column)
            .ok_or_else(|| Error::ColumnNotFound(kept.column.clone()))?;
        let mapped = series.map(DataType::Str, |v| match v {
            Value::Str(s) => {
                if kept.levels.iter().any(|l| l == s) {
                    Value::Str(s.clone())
                } else {
                    Value::Str(label.to_string())
                }
            }
            _ => Value::Na,
        })?;
        result.replace_column(&kept.column, mapped)?;
    }
    Ok(result)
}
