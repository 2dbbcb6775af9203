//! Declared recipes and their prepared form.
//!
//! A [`Recipe`] is purely descriptive: an ordered step sequence plus a
//! role assignment, touching no data. [`Recipe::prepare`] resolves it
//! against one training frame and returns a [`PreparedRecipe`] with every
//! step's parameters frozen; the declared recipe stays reusable for
//! further preparations. A prepared recipe applies ("bakes") to any
//! schema-compatible frame, any number of times, without re-learning.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::role::{RoleSpec, RoleTable};
use crate::schema::Schema;
use crate::selector::{resolve_for_step, Selector};
use crate::step::{PrepareContext, PreparedStep, Step};

/// Version tag of the serialized prepared-recipe blob.
pub const FORMAT_VERSION: u32 = 1;

/// An ordered, immutable sequence of declared steps with a role
/// assignment. Construction is a consuming builder; once built, a recipe
/// only ever lends itself out (`prepare` borrows), so the same declared
/// value can back any number of experiments.
#[derive(Default)]
pub struct Recipe {
    steps: Vec<Box<dyn Step>>,
    roles: RoleSpec,
}

impl Recipe {
    pub fn new() -> Self {
        Recipe {
            steps: Vec::new(),
            roles: RoleSpec::new(),
        }
    }

    /// Declare an outcome column. May be called more than once.
    pub fn with_outcome(mut self, column: impl Into<String>) -> Self {
        self.roles = self.roles.with_outcome(column);
        self
    }

    /// Attach a custom role to a column (for example an identifier).
    /// Columns with a custom role are not predictors.
    pub fn with_role(mut self, column: impl Into<String>, role: impl Into<String>) -> Self {
        self.roles = self.roles.with_custom_role(column, role);
        self
    }

    /// Append a step. Order is semantically significant: each step sees
    /// the schema produced by all steps before it.
    pub fn add_step<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Resolve the recipe against a training frame: selectors are matched
    /// once against the running schema, each step learns its parameters
    /// from the partially transformed training data, and the frame is
    /// advanced step by step. Fails atomically; no partial prepared
    /// recipe is ever produced.
    pub fn prepare(&self, training: &DataFrame) -> Result<PreparedRecipe> {
        if training.nrows() == 0 {
            return Err(Error::EmptyData(
                "cannot prepare a recipe against an empty frame".to_string(),
            ));
        }
        let original_schema = training.schema();
        let mut roles = self.roles.resolve(&original_schema)?;
        let mut current = training.clone();
        let mut prepared_steps = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let running_schema = current.schema();
            let columns = resolve_for_step(
                step.selector(),
                &running_schema,
                &roles,
                &original_schema,
                step.name(),
                step.targets_outcome(),
            )?;
            let ctx = PrepareContext::new(
                step.name(),
                columns.clone(),
                &running_schema,
                &roles,
                &original_schema,
                step.targets_outcome(),
            );
            let state = step.prepare(&current, &ctx)?;

            let prepared = PreparedStep::new(step.name(), columns, step.skip_on_apply(), state);
            let next = prepared.execute(&current)?;
            if next.nrows() != current.nrows() {
                return Err(Error::InconsistentRowCount {
                    expected: current.nrows(),
                    found: next.nrows(),
                });
            }
            debug!(
                "prepared step '{}' on [{}]: {} -> {} columns",
                prepared.name(),
                prepared.input_columns().join(", "),
                current.ncols(),
                next.ncols()
            );
            roles.sync(&next.column_names());
            current = next;
            prepared_steps.push(prepared);
        }

        info!(
            "prepared recipe with {} steps against {} rows x {} columns",
            prepared_steps.len(),
            training.nrows(),
            training.ncols()
        );
        Ok(PreparedRecipe {
            version: FORMAT_VERSION,
            steps: prepared_steps,
            training_schema: original_schema,
            roles,
            training: current,
        })
    }
}

/// A recipe resolved against one training frame: frozen learned state per
/// step, the training schema, the output role table, and the transformed
/// training frame itself. Immutable; re-preparing the declared recipe
/// produces a fresh instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRecipe {
    version: u32,
    steps: Vec<PreparedStep>,
    training_schema: Schema,
    roles: RoleTable,
    training: DataFrame,
}

impl PreparedRecipe {
    pub fn steps(&self) -> &[PreparedStep] {
        &self.steps
    }

    /// Schema of the frame the recipe was prepared against.
    pub fn training_schema(&self) -> &Schema {
        &self.training_schema
    }

    /// Roles of the *output* columns; generated columns are predictors.
    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Apply the prepared steps. `None` returns the transformed training
    /// frame retained from preparation; `Some(frame)` runs every
    /// non-skipped step against the given frame. Fails atomically with
    /// [`Error::SchemaMismatch`] if a required column is absent.
    pub fn bake(&self, data: Option<&DataFrame>) -> Result<DataFrame> {
        let frame = match data {
            None => {
                debug!("bake: returning retained training frame");
                self.training.clone()
            }
            Some(new_data) => {
                let mut current = new_data.clone();
                for step in &self.steps {
                    let next = step.apply(&current)?;
                    if next.nrows() != current.nrows() {
                        return Err(Error::InconsistentRowCount {
                            expected: current.nrows(),
                            found: next.nrows(),
                        });
                    }
                    current = next;
                }
                info!(
                    "baked {} rows through {} steps",
                    current.nrows(),
                    self.steps.len()
                );
                current
            }
        };
        Ok(frame)
    }

    /// Bake and then project to the columns matched by `keep`. The
    /// projection runs strictly after all steps; it never short-circuits
    /// step computation.
    pub fn bake_select(&self, data: Option<&DataFrame>, keep: &Selector) -> Result<DataFrame> {
        let baked = self.bake(data)?;
        let schema = baked.schema();
        let names = keep.resolve(&schema, &self.roles);
        if names.is_empty() {
            return Err(Error::UnknownColumn {
                step: "bake".to_string(),
                selector: keep.to_string(),
            });
        }
        baked.select(&names)
    }

    /// Serialize to a versioned JSON blob: steps with parameters, learned
    /// state, training schema, roles, and the retained training frame.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a blob produced by [`PreparedRecipe::to_json`].
    /// Rejects blobs written by an incompatible crate version.
    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: PreparedRecipe = serde_json::from_str(json)?;
        if recipe.version != FORMAT_VERSION {
            return Err(Error::InvalidInput(format!(
                "unsupported prepared-recipe format version {} (expected {})",
                recipe.version, FORMAT_VERSION
            )));
        }
        Ok(recipe)
    }
}
