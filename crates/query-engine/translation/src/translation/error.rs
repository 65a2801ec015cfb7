//! Errors for query translation.

use std::fmt;

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("missing required argument '{0}'")]
    ArgumentNotFound(String),
    #[error("argument '{name}' must be {expected}, found {found}")]
    InvalidArgument {
        name: String,
        expected: &'static str,
        found: String,
    },
    #[error("'{name}' is not a valid {kind} name")]
    InvalidIdentifier { kind: IdentifierKind, name: String },
}

/// What an identifier was going to be used as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Table,
    Column,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdentifierKind::Table => write!(f, "table"),
            IdentifierKind::Column => write!(f, "column"),
        }
    }
}
