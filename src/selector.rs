//! Column selectors.
//!
//! A selector is a closed, declarative description of which columns a step
//! targets. Selectors are evaluated exactly once per step, at prepare
//! time, against the running training schema; the resolved concrete name
//! list is cached into the prepared step so apply never re-matches against
//! a possibly different schema.

use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::role::{Role, RoleTable};
use crate::schema::{Field, Schema};

/// Ways a step can pick its target columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Literal column names, matched in the given order.
    Columns(Vec<String>),
    /// Every column whose name starts with the prefix.
    StartsWith(String),
    /// Every column whose name ends with the suffix.
    EndsWith(String),
    /// Every column carrying the role.
    WithRole(Role),
    /// Every predictor column.
    AllPredictors,
    /// Every numeric predictor column.
    NumericPredictors,
    /// Every nominal (string or boolean) predictor column.
    NominalPredictors,
    /// Every outcome column.
    AllOutcomes,
}

impl Selector {
    /// Shorthand for a single literal column.
    pub fn column(name: impl Into<String>) -> Self {
        Selector::Columns(vec![name.into()])
    }

    /// Shorthand for several literal columns.
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::Columns(names.into_iter().map(Into::into).collect())
    }

    fn matches(&self, field: &Field, roles: &RoleTable) -> bool {
        let predictor = roles.has_role(&field.name, &Role::Predictor);
        match self {
            Selector::Columns(names) => names.iter().any(|n| *n == field.name),
            Selector::StartsWith(prefix) => field.name.starts_with(prefix.as_str()),
            Selector::EndsWith(suffix) => field.name.ends_with(suffix.as_str()),
            Selector::WithRole(role) => roles.has_role(&field.name, role),
            Selector::AllPredictors => predictor,
            Selector::NumericPredictors => predictor && field.dtype.is_numeric(),
            Selector::NominalPredictors => predictor && field.dtype.is_nominal(),
            Selector::AllOutcomes => roles.has_role(&field.name, &Role::Outcome),
        }
    }

    /// Concrete column names matched against a schema. Literal selectors
    /// keep their declared order; everything else follows schema order.
    pub(crate) fn resolve(&self, schema: &Schema, roles: &RoleTable) -> Vec<String> {
        match self {
            Selector::Columns(names) => names
                .iter()
                .filter(|n| schema.contains(n))
                .cloned()
                .collect(),
            _ => schema
                .fields()
                .iter()
                .filter(|f| self.matches(f, roles))
                .map(|f| f.name.clone())
                .collect(),
        }
    }
}

/// Resolve a step's selector with the full prepare-time error semantics:
/// a literal name that an earlier step removed is a dependency-order
/// violation, a name that never existed (or an empty match) is an unknown
/// column, and an undeclared match on an outcome column is a role
/// conflict.
pub(crate) fn resolve_for_step(
    selector: &Selector,
    schema: &Schema,
    roles: &RoleTable,
    original: &Schema,
    step: &str,
    targets_outcome: bool,
) -> Result<Vec<String>> {
    if let Selector::Columns(names) = selector {
        for name in names {
            if !schema.contains(name) {
                if original.contains(name) {
                    return Err(Error::DependencyOrderViolation {
                        step: step.to_string(),
                        column: name.clone(),
                    });
                }
                return Err(Error::UnknownColumn {
                    step: step.to_string(),
                    selector: selector.to_string(),
                });
            }
        }
    }

    let resolved = selector.resolve(schema, roles);
    if resolved.is_empty() {
        return Err(Error::UnknownColumn {
            step: step.to_string(),
            selector: selector.to_string(),
        });
    }

    if !targets_outcome {
        for name in &resolved {
            if roles.is_outcome(name) {
                return Err(Error::RoleConflict {
                    step: step.to_string(),
                    column: name.clone(),
                });
            }
        }
    }

    Ok(resolved)
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Columns(names) => write!(f, "columns({})", names.join(", ")),
            Selector::StartsWith(prefix) => write!(f, "starts_with({})", prefix),
            Selector::EndsWith(suffix) => write!(f, "ends_with({})", suffix),
            Selector::WithRole(role) => write!(f, "with_role({:?})", role),
            Selector::AllPredictors => write!(f, "all_predictors()"),
            Selector::NumericPredictors => write!(f, "numeric_predictors()"),
            Selector::NominalPredictors => write!(f, "nominal_predictors()"),
            Selector::AllOutcomes => write!(f, "all_outcomes()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleSpec;
    use crate::value::DataType;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("price", DataType::Float64),
            Field::new("area", DataType::Float64),
            Field::new("rooms", DataType::Int64),
            Field::new("kind", DataType::Str),
        ])
    }

    #[test]
    fn role_predicates_respect_outcome() -> Result<()> {
        let schema = schema();
        let roles = RoleSpec::new().with_outcome("price").resolve(&schema)?;

        assert_eq!(
            Selector::NumericPredictors.resolve(&schema, &roles),
            vec!["area", "rooms"]
        );
        assert_eq!(
            Selector::NominalPredictors.resolve(&schema, &roles),
            vec!["kind"]
        );
        assert_eq!(Selector::AllOutcomes.resolve(&schema, &roles), vec!["price"]);
        Ok(())
    }

    #[test]
    fn prefix_resolution_follows_schema_order() -> Result<()> {
        let schema = schema();
        let roles = RoleSpec::new().resolve(&schema)?;
        assert_eq!(
            Selector::StartsWith("r".to_string()).resolve(&schema, &roles),
            vec!["rooms"]
        );
        Ok(())
    }

    #[test]
    fn unknown_literal_name_is_rejected() -> Result<()> {
        let schema = schema();
        let roles = RoleSpec::new().resolve(&schema)?;
        let result = resolve_for_step(
            &Selector::column("bogus"),
            &schema,
            &roles,
            &schema,
            "log",
            false,
        );
        assert!(matches!(result, Err(Error::UnknownColumn { .. })));
        Ok(())
    }
}
