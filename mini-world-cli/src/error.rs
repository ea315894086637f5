use mini_world_catalog::CatalogError;
use mini_world_db::{DbError, SchemaError};
use thiserror::Error;

/// Errors that can occur while running the console.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Could not open the database
    #[error("Error connecting to database: {0}")]
    Connection(#[from] SchemaError),

    /// Statement or query failed
    #[error("{0}")]
    Database(#[from] DbError),

    /// Catalog could not be loaded or was misused
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Operator input rejected
    #[error("{0}")]
    Validation(String),

    /// Line editor failure other than interrupt/EOF
    #[error("Input error: {0}")]
    Readline(String),

    /// Ctrl-C or end of input
    #[error("Interrupted by user")]
    Interrupted,
}

impl CliError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn readline(msg: impl Into<String>) -> Self {
        Self::Readline(msg.into())
    }
}
