//! Validation of the names we place in identifier positions.
//!
//! Type and field names arrive from the schema and the request, so they are
//! checked against a strict grammar before they reach the SQL text: an ASCII
//! letter or underscore followed by ASCII letters, digits or underscores, no
//! longer than Postgres' identifier limit.

use query_engine_sql::sql::ast::{ColumnName, TableName};

use super::error::{Error, IdentifierKind};

/// Postgres truncates identifiers longer than this (NAMEDATALEN - 1).
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Check that `name` is a plain identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= MAX_IDENTIFIER_LENGTH
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate(kind: IdentifierKind, name: &str) -> Result<(), Error> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Validate a relation name produced by the relation namer.
pub fn table_name(relation: &str) -> Result<TableName, Error> {
    validate(IdentifierKind::Table, relation)?;
    Ok(TableName(relation.to_string()))
}

/// Validate a requested field name and produce the column it reads.
///
/// Field names are folded to lower case, the way Postgres folds unquoted
/// identifiers, so `createdAt` reads the column `createdat`.
pub fn column_name(field: &str) -> Result<ColumnName, Error> {
    validate(IdentifierKind::Column, field)?;
    Ok(ColumnName(field.to_ascii_lowercase()))
}
