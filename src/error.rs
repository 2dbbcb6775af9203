use thiserror::Error;

/// Error type covering both the tabular data model and the recipe
/// prepare/bake lifecycle.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown column: selector {selector} matched no columns in step '{step}'")]
    UnknownColumn { step: String, selector: String },

    #[error("schema mismatch: column '{column}' required by step '{step}' is missing from the input")]
    SchemaMismatch { step: String, column: String },

    #[error("dependency order violation: step '{step}' references column '{column}', which an earlier step removed")]
    DependencyOrderViolation { step: String, column: String },

    #[error("role conflict: step '{step}' targets outcome column '{column}' without declaring it")]
    RoleConflict { step: String, column: String },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("column type mismatch: column '{name}' expected {expected}, found {found}")]
    ColumnTypeMismatch {
        name: String,
        expected: crate::value::DataType,
        found: crate::value::DataType,
    },

    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    OperationFailed(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Alias for results produced throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
