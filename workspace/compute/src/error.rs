use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A required request field is missing or holds an invalid value
    #[error("Validation error: {0}")]
    Validation(String),

    /// No brand or no active pricing exists for the practice and brand pair
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from the database operations, surfaced as-is
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
