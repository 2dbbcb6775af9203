//! Pipeline steps.
//!
//! A step exists in two phases. The *declared* phase is a specification
//! value implementing [`Step`]: a selector, options, and no knowledge of
//! any data. Preparing a recipe turns each declared step into a
//! [`PreparedStep`]: the selector resolved to concrete column names and
//! the learned parameters frozen into a [`StepState`]. Application is a
//! pure function of the prepared step and an input frame.

pub mod dummy;
pub mod impute;
pub mod interact;
pub mod log;
pub mod normalize;
pub mod other;
pub mod spline;

pub use self::dummy::{DummyEncoding, StepDummy};
pub use self::impute::{ColumnFill, ImputeStrategy, StepImpute};
pub use self::interact::{InteractionPair, StepInteract};
pub use self::log::StepLog;
pub use self::normalize::{ColumnBounds, ColumnMoments, StepNormalize, StepRange};
pub use self::other::{RetainedLevels, StepOther};
pub use self::spline::{SplineKnots, StepSpline};

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::role::RoleTable;
use crate::schema::Schema;
use crate::selector::{resolve_for_step, Selector};

/// A declared transformation: what to do, not yet resolved against data.
pub trait Step: Send + Sync {
    /// Step name, used in error context and logs.
    fn name(&self) -> &str;

    /// The columns this step targets.
    fn selector(&self) -> &Selector;

    /// Whether the step runs only at training time. Skipped steps still
    /// participate in preparation but are a no-op when a prepared recipe
    /// is applied to new data.
    fn skip_on_apply(&self) -> bool {
        false
    }

    /// Whether the step is allowed to touch outcome-role columns.
    fn targets_outcome(&self) -> bool {
        false
    }

    /// Learn the step's parameters from the training frame. `ctx` carries
    /// the resolved target columns and the running schema.
    fn prepare(&self, data: &DataFrame, ctx: &PrepareContext<'_>) -> Result<StepState>;
}

/// Prepare-time context handed to [`Step::prepare`].
pub struct PrepareContext<'a> {
    step: String,
    columns: Vec<String>,
    schema: &'a Schema,
    roles: &'a RoleTable,
    original: &'a Schema,
    targets_outcome: bool,
}

impl<'a> PrepareContext<'a> {
    pub(crate) fn new(
        step: &str,
        columns: Vec<String>,
        schema: &'a Schema,
        roles: &'a RoleTable,
        original: &'a Schema,
        targets_outcome: bool,
    ) -> Self {
        PrepareContext {
            step: step.to_string(),
            columns,
            schema,
            roles,
            original,
            targets_outcome,
        }
    }

    /// The step's primary selector, already resolved to concrete names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The running schema at this point of the step sequence.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Resolve an additional selector (steps with more than one column
    /// group) under the same error semantics as the primary one.
    pub fn resolve(&self, selector: &Selector) -> Result<Vec<String>> {
        resolve_for_step(
            selector,
            self.schema,
            self.roles,
            self.original,
            &self.step,
            self.targets_outcome,
        )
    }
}

/// Learned state, one variant per supported step family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepState {
    Log { base: Option<f64>, offset: f64 },
    Normalize { moments: Vec<ColumnMoments> },
    Range { bounds: Vec<ColumnBounds> },
    Impute { fills: Vec<ColumnFill> },
    Dummy { encodings: Vec<DummyEncoding> },
    Other { retained: Vec<RetainedLevels>, label: String },
    Spline { knots: Vec<SplineKnots> },
    Interact { pairs: Vec<InteractionPair> },
}

/// A step with its learned state frozen against one training frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedStep {
    name: String,
    columns: Vec<String>,
    skip_on_apply: bool,
    state: StepState,
}

impl PreparedStep {
    pub(crate) fn new(
        name: &str,
        columns: Vec<String>,
        skip_on_apply: bool,
        state: StepState,
    ) -> Self {
        PreparedStep {
            name: name.to_string(),
            columns,
            skip_on_apply,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The concrete columns the selector resolved to at prepare time.
    pub fn input_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn skip_on_apply(&self) -> bool {
        self.skip_on_apply
    }

    pub fn state(&self) -> &StepState {
        &self.state
    }

    /// Columns that must be present in an incoming frame for this step.
    fn required_columns(&self) -> Vec<&str> {
        match &self.state {
            StepState::Interact { pairs } => {
                let mut required: Vec<&str> = Vec::new();
                for pair in pairs {
                    for name in [pair.left.as_str(), pair.right.as_str()] {
                        if !required.contains(&name) {
                            required.push(name);
                        }
                    }
                }
                required
            }
            _ => self.columns.iter().map(String::as_str).collect(),
        }
    }

    /// Run the transformation unconditionally (training-time path).
    pub(crate) fn execute(&self, data: &DataFrame) -> Result<DataFrame> {
        match &self.state {
            StepState::Log { base, offset } => {
                self::log::apply_log(data, &self.columns, *base, *offset)
            }
            StepState::Normalize { moments } => self::normalize::apply_normalize(data, moments),
            StepState::Range { bounds } => self::normalize::apply_range(data, bounds),
            StepState::Impute { fills } => self::impute::apply_impute(data, fills),
            StepState::Dummy { encodings } => self::dummy::apply_dummy(data, encodings),
            StepState::Other { retained, label } => {
                self::other::apply_other(data, retained, label)
            }
            StepState::Spline { knots } => self::spline::apply_spline(data, knots),
            StepState::Interact { pairs } => self::interact::apply_interact(data, pairs),
        }
    }

    /// Apply at bake time: validates the incoming schema first and honors
    /// the skip-on-apply flag.
    pub(crate) fn apply(&self, data: &DataFrame) -> Result<DataFrame> {
        if self.skip_on_apply {
            return Ok(data.clone());
        }
        self.check_schema(data)?;
        self.execute(data)
    }

    fn check_schema(&self, data: &DataFrame) -> Result<()> {
        for column in self.required_columns() {
            if !data.contains_column(column) {
                return Err(Error::SchemaMismatch {
                    step: self.name.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}
