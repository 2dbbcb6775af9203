//! Natural cubic spline basis expansion step.

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::series::Series;
use crate::step::{PrepareContext, Step, StepState};
use crate::value::{DataType, Value};

/// Learned knot placement for one column: boundary knots at the training
/// extremes and interior knots at evenly spaced training quantiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineKnots {
    pub column: String,
    pub boundary: (f64, f64),
    pub interior: Vec<f64>,
}

/// Expand a numeric column into a natural cubic spline basis with a fixed
/// number of degrees of freedom. Uses the truncated-power construction,
/// so the fitted function is linear beyond the boundary knots. Output
/// columns are `<column>_ns_1 .. <column>_ns_<deg_free>`; the source
/// column is dropped.
#[derive(Debug, Clone)]
pub struct StepSpline {
    selector: Selector,
    deg_free: usize,
}

impl StepSpline {
    pub fn new(selector: Selector) -> Self {
        StepSpline {
            selector,
            deg_free: 3,
        }
    }

    /// Number of basis columns per input column.
    pub fn with_deg_free(mut self, deg_free: usize) -> Self {
        self.deg_free = deg_free;
        self
    }
}

impl Step for StepSpline {
    fn name(&self) -> &str {
        "spline"
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState> {
        if self.deg_free == 0 {
            return Err(Error::InvalidInput(
                "spline degrees of freedom must be at least 1".to_string(),
            ));
        }
        let mut knots = Vec::with_capacity(ctx.columns().len());
        for name in ctx.columns() {
            let series = data
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            let boundary = (series.min()?, series.max()?);
            let mut interior = Vec::with_capacity(self.deg_free - 1);
            for k in 1..self.deg_free {
                interior.push(series.quantile(k as f64 / self.deg_free as f64)?);
            }
            knots.push(SplineKnots {
                column: name.clone(),
                boundary,
                interior,
            });
        }
        Ok(StepState::Spline { knots })
    }
}

fn cube_plus(v: f64) -> f64 {
    if v > 0.0 {
        v * v * v
    } else {
        0.0
    }
}

/// Basis values at `x` for the given knots. The first function is the
/// identity; the remaining ones are the natural-spline differences
/// `d_j(x) - d_{K-1}(x)` over the full knot sequence.
fn natural_basis(x: f64, knots: &SplineKnots) -> Vec<f64> {
    let mut xs = Vec::with_capacity(knots.interior.len() + 2);
    xs.push(knots.boundary.0);
    xs.extend_from_slice(&knots.interior);
    xs.push(knots.boundary.1);
    let k = xs.len();

    let d = |j: usize| -> f64 {
        let denom = xs[k - 1] - xs[j];
        if denom.abs() < 1e-12 {
            return 0.0;
        }
        (cube_plus(x - xs[j]) - cube_plus(x - xs[k - 1])) / denom
    };

    let mut basis = Vec::with_capacity(k - 1);
    basis.push(x);
    let d_last = d(k - 2);
    for j in 0..k - 2 {
        basis.push(d(j) - d_last);
    }
    basis
}

pub(crate) fn apply_spline(data: &DataFrame, knots: &[SplineKnots]) -> Result<DataFrame> {
    let mut result = data.clone();
    for kn in knots {
        let source = result
            .column(&kn.column)
            .ok_or_else(|| Error::ColumnNotFound(kn.column.clone()))?
            .clone();
        let deg_free = kn.interior.len() + 1;
        let mut columns: Vec<Vec<Value>> =
            vec![Vec::with_capacity(source.len()); deg_free];
        for value in source.iter() {
            match value.as_f64() {
                Some(x) => {
                    for (i, b) in natural_basis(x, kn).into_iter().enumerate() {
                        columns[i].push(Value::Float64(b));
                    }
                }
                None => {
                    for column in columns.iter_mut() {
                        column.push(Value::Na);
                    }
                }
            }
        }
        for (i, values) in columns.into_iter().enumerate() {
            let basis = Series::new(values, DataType::Float64)?;
            result.add_column(format!("{}_ns_{}", kn.column, i + 1), basis)?;
        }
        result.drop_column(&kn.column)?;
    }
    Ok(result)
}
