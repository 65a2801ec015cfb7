//! Errors for query execution.

use thiserror::Error;

/// Query execution error.
#[derive(Debug, Error)]
pub enum Error {
    /// The database rejected or failed to run the statement.
    #[error("error executing query: {0}")]
    Execution(sqlx::Error),
    /// A column could not be read as nullable text.
    #[error("unable to decode column {column} as text: {source}")]
    Decode { column: usize, source: sqlx::Error },
    /// A row did not have one column per requested field.
    #[error("expected {expected} columns in each row, found {found}")]
    ColumnCount { expected: usize, found: usize },
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Error {
        Error::Execution(err)
    }
}
