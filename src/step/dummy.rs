//! Indicator (one-hot) encoding step.

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// Learned level set of one encoded column: the dropped reference level
/// and the levels that receive indicator columns, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyEncoding {
    pub column: String,
    pub reference: String,
    pub levels: Vec<String>,
}

/// Encode nominal columns as 0/1 indicator columns named
/// `<column>_<level>`. Levels are the sorted distinct training values;
/// the first is the reference and gets no column. The source column is
/// dropped. A level unseen in training encodes as the all-zero reference
/// row; a missing value propagates `NA` to every indicator.
#[derive(Debug, Clone)]
pub struct StepDummy {
    selector: Selector,
}

impl StepDummy {
    pub fn new(selector: Selector) -> Self {
        StepDummy { selector }
    }
}

impl Step for StepDummy {
    fn name(&self) -> &str {
        "dummy"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        let mut encodings = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let field = ctx
                .schema()
                .field(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            if !field.dtype.is_nominal() {
                return Err(Error::ColumnTypeMismatch {
                    name: name.clone(),
                    expected: DataType::Str,
                    found: field.dtype,
                });
            }
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            let mut levels = series.levels();
            if levels.is_empty() {
                return Err(Error::EmptyData(format!(
                    "column '{}' has no observed levels",
                    name
                )));
            }
            let reference = levels.remove(0);
            encodings.push(DummyEncoding {
                column: name.clone(),
                reference,
                levels,
            });
        }
        Ok(StepState::Dummy { encodings })
    }
}

pub(crate) fn apply_dummy(data: &DataFrame, encodings: &[DummyEncoding]) -> Result<DataFrame> {
    let mut result = data.clone();
    for encoding in encodings {
        let source = result
            .column(&encoding.column)
            .ok_or_else(|| Error::ColumnNotFound(encoding.column.clone()))?
            .clone();
        for level in &encoding.levels {
            let indicator = source.map(DataType::Int64, |v| match v.as_level() {
                Some(observed) => Value::Int64((observed == *level) as i64),
                None => Value::Na,
            })?;
            result.add_column(format!("{}_{}", encoding.column, level), indicator)?;
        }
        result.drop_column(&encoding.column)?;
    }
    Ok(result)
}
