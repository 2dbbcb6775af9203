//! # reciprs
//!
//! Declarative feature-engineering pipelines for tabular data.
//!
//! A [`Recipe`] describes an ordered sequence of transformation steps over
//! role-tagged columns without touching any data. Preparing it against a
//! training frame freezes each step's learned parameters into a
//! [`PreparedRecipe`], which can then be applied ("baked") to the training
//! data or to new data any number of times:
//!
//! ```
//! use reciprs::{DataFrame, Recipe, Selector, Series, StepDummy, StepLog};
//!
//! # fn main() -> reciprs::Result<()> {
//! let mut train = DataFrame::new();
//! train.add_column("price", Series::from_numeric(&[310_000.0, 450_000.0, 280_000.0]))?;
//! train.add_column("area", Series::from_numeric(&[120.0, 180.0, 95.0]))?;
//! train.add_column("type", Series::from_strings(&["condo", "house", "condo"]))?;
//!
//! let recipe = Recipe::new()
//!     .with_outcome("price")
//!     .add_step(StepLog::new(Selector::column("area")))
//!     .add_step(StepDummy::new(Selector::column("type")));
//!
//! let prepared = recipe.prepare(&train)?;
//! let baked = prepared.bake(None)?;
//! assert_eq!(baked.nrows(), 3);
//! assert!(baked.contains_column("type_house"));
//! # Ok(())
//! # }
//! ```
//!
//! Steps operate on predictor columns only unless they explicitly declare
//! that they target outcomes; selectors are resolved once, at prepare
//! time, against the running training schema. Preparation and application
//! are pure functions over immutable inputs: a declared recipe can be
//! prepared against different training frames concurrently, and a
//! prepared recipe can be baked from several threads at once.

pub mod dataframe;
pub mod error;
pub mod io;
pub mod recipe;
pub mod role;
pub mod schema;
pub mod selector;
pub mod series;
pub mod split;
pub mod step;
pub mod value;

pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use recipe::{PreparedRecipe, Recipe, FORMAT_VERSION};
pub use role::{Role, RoleSpec};
pub use schema::{Field, Schema};
pub use selector::Selector;
pub use series::Series;
pub use split::train_test_split;
pub use step::{
    ImputeStrategy, PreparedStep, Step, StepDummy, StepImpute, StepInteract, StepLog,
    StepNormalize, StepOther, StepRange, StepSpline,
};
pub use value::{DataType, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
