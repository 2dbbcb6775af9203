//! Logarithmic transform step.

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// Replace numeric columns by their logarithm. Carries no learned state
/// beyond its own options; preparation only validates the targets.
///
/// With `targeting_outcomes(true)` and `with_skip(true)` this is the
/// canonical training-time outcome transformation: it shapes the prepared
/// training frame but leaves new data untouched at apply time.
#[derive(Debug, Clone)]
pub struct StepLog {
    selector: Selector,
    base: Option<f64>,
    offset: f64,
    skip: bool,
    outcome: bool,
}

impl StepLog {
    /// Natural logarithm of the selected columns, no offset.
    pub fn new(selector: Selector) -> Self {
        StepLog {
            selector,
            base: None,
            offset: 0.0,
            skip: false,
            outcome: false,
        }
    }

    /// Use a logarithm base other than `e`.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a constant before taking the logarithm.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Run only at training time.
    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Allow the selector to match outcome-role columns.
    pub fn targeting_outcomes(mut self, targets: bool) -> Self {
        self.outcome = targets;
        self
    }
}

impl Step for StepLog {
    fn name(&self) -> &str {
        "log"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn skip_on_apply(&self) -> bool {
        self.skip
    }

    fn targets_outcome(&self) -> bool {
        self.outcome
    }

    fn prepare(&self, _data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        if let Some(base) = self.base {
            if base <= 0.0 || base == 1.0 {
                return Err(Error::InvalidInput(format!(
                    "log base must be positive and not 1, got {}",
                    base
                )));
            }
        }
        for name in ctx.columns() {
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
        Ok(StepState::Log {
            base: self.base,
            offset: self.offset,
        })
    }
}

pub(crate) fn apply_log(
    data: &DataFrame,
    columns: &[String],
    base: Option<f64>,
    offset: f64,
) -> Result<DataFrame> {
    let mut result = data.clone();
    for name in columns {
        let series = result
            .column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
        let mapped = series.map(DataType::Float64, |v| match v.as_f64() {
            Some(x) => {
                let shifted = x + offset;
                if shifted <= 0.0 {
                    Value::Na
                } else {
                    let ln = shifted.ln();
                    match base {
                        Some(b) => Value::Float64(ln / b.ln()),
                        None => Value::Float64(ln),
                    }
                }
            }
            None => Value::Na,
        })?;
        result.replace_column(name, mapped)?;
    }
    Ok(result)
}
