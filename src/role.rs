//! Column roles and their resolution against a training schema.
//!
//! Roles tag what a column is *for*: the modeled outcome, a predictor, or
//! a user-defined function such as an identifier. Steps operate on
//! predictor columns only, unless a step explicitly declares that it
//! targets outcomes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Schema;

/// Function of a column within a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Outcome,
    Predictor,
    Custom(String),
}

/// Role declaration supplied when a recipe is constructed: outcome
/// column(s), optional custom `(column, role)` pairs, and every remaining
/// column a predictor.
#[derive(Debug, Clone, Default)]
pub struct RoleSpec {
    outcomes: Vec<String>,
    custom: Vec<(String, String)>,
}

impl RoleSpec {
    pub fn new() -> Self {
        RoleSpec::default()
    }

    pub fn with_outcome(mut self, column: impl Into<String>) -> Self {
        self.outcomes.push(column.into());
        self
    }

    pub fn with_custom_role(
        mut self,
        column: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.custom.push((column.into(), role.into()));
        self
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    /// Resolve the declaration against a concrete training schema into a
    /// per-column role table. Columns named by the declaration must exist.
    pub fn resolve(&self, schema: &Schema) -> Result<RoleTable> {
        for name in &self.outcomes {
            if !schema.contains(name) {
                return Err(Error::ColumnNotFound(name.clone()));
            }
        }
        for (name, _) in &self.custom {
            if !schema.contains(name) {
                return Err(Error::ColumnNotFound(name.clone()));
            }
        }

        let mut entries = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            let mut roles = Vec::new();
            if self.outcomes.contains(&field.name) {
                roles.push(Role::Outcome);
            }
            for (name, role) in &self.custom {
                if *name == field.name {
                    roles.push(Role::Custom(role.clone()));
                }
            }
            if roles.is_empty() {
                roles.push(Role::Predictor);
            }
            entries.push(RoleEntry {
                column: field.name.clone(),
                roles,
            });
        }
        Ok(RoleTable { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RoleEntry {
    column: String,
    roles: Vec<Role>,
}

/// Concrete per-column roles, resolved against one schema. Kept in sync
/// with the running frame as steps add and remove columns: generated
/// columns become predictors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTable {
    entries: Vec<RoleEntry>,
}

impl RoleTable {
    pub fn roles_of(&self, column: &str) -> Option<&[Role]> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.roles.as_slice())
    }

    pub fn has_role(&self, column: &str, role: &Role) -> bool {
        self.roles_of(column)
            .map_or(false, |roles| roles.contains(role))
    }

    pub fn is_outcome(&self, column: &str) -> bool {
        self.has_role(column, &Role::Outcome)
    }

    /// Columns carrying the given role, in table order.
    pub fn columns_with(&self, role: &Role) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.roles.contains(role))
            .map(|e| e.column.clone())
            .collect()
    }

    /// Align the table to the columns of an evolved frame: dropped columns
    /// leave the table, new columns enter as predictors, order follows the
    /// frame.
    pub(crate) fn sync(&mut self, columns: &[String]) {
        let mut entries = Vec::with_capacity(columns.len());
        for column in columns {
            match self.entries.iter().find(|e| e.column == *column) {
                Some(existing) => entries.push(existing.clone()),
                None => entries.push(RoleEntry {
                    column: column.clone(),
                    roles: vec![Role::Predictor],
                }),
            }
        }
        self.entries = entries;
    }
}
