//! The generic shape rows are decoded into.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;

/// The columns of one row, each read as nullable text, in projection order.
pub type TextRow = Vec<Option<String>>;

/// One row, keyed by the requested field names in the order they were requested.
///
/// A value of `None` is a database `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Option<String>>);

impl Record {
    /// Pair each requested field with the column at the same position.
    pub fn from_row(fields: &[String], row: TextRow) -> Result<Record, Error> {
        if row.len() != fields.len() {
            return Err(Error::ColumnCount {
                expected: fields.len(),
                found: row.len(),
            });
        }
        Ok(Record(fields.iter().cloned().zip(row).collect()))
    }

    /// The value of `field`: `None` if the field was not requested,
    /// `Some(None)` if it was and the column was `NULL`.
    pub fn get(&self, field: &str) -> Option<Option<&str>> {
        self.0.get(field).map(Option::as_deref)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        Record(iter.into_iter().collect())
    }
}
