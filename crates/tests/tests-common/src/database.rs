//! An in-memory stand-in for the database.
//!
//! It understands the statements the query engine generates: `SELECT 1`, and a
//! projection of text-cast columns from one table, optionally filtered on the
//! text of its `id` column and limited.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use query_engine_execution::error::Error;
use query_engine_execution::record::TextRow;
use query_engine_execution::storage::Storage;
use query_engine_sql::sql::string::{Param, SQL};

pub type Row = BTreeMap<String, Option<String>>;

#[derive(Debug, Default)]
pub struct FakeDatabase {
    tables: BTreeMap<String, Vec<Row>>,
    failure: Option<String>,
    statements: Mutex<Vec<SQL>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        FakeDatabase::default()
    }

    /// A database where every statement fails with `message`.
    pub fn failing(message: &str) -> Self {
        FakeDatabase {
            failure: Some(message.to_string()),
            ..FakeDatabase::default()
        }
    }

    /// Add a table. Rows are kept in the order given.
    #[must_use]
    pub fn with_table(mut self, name: &str, rows: &[&[(&str, Option<&str>)]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(column, value)| ((*column).to_string(), value.map(str::to_string)))
                    .collect()
            })
            .collect();
        self.tables.insert(name.to_string(), rows);
        self
    }

    /// Every statement run so far, oldest first.
    pub fn statements(&self) -> Vec<SQL> {
        self.statements.lock().unwrap().clone()
    }

    pub fn last_statement(&self) -> Option<SQL> {
        self.statements.lock().unwrap().last().cloned()
    }

    fn run(&self, query: &SQL) -> Result<Vec<TextRow>, Error> {
        self.statements.lock().unwrap().push(query.clone());

        if let Some(message) = &self.failure {
            return Err(error(message));
        }
        if query.sql == "SELECT 1" {
            return Ok(vec![vec![Some("1".to_string())]]);
        }

        let rest = query
            .sql
            .strip_prefix("SELECT ")
            .ok_or_else(|| error("syntax error"))?;
        let (projection, rest) = rest
            .split_once(" FROM ")
            .ok_or_else(|| error("syntax error"))?;
        let (table, filter) = match rest.split_once(" WHERE ") {
            Some((table, filter)) => (table, Some(filter)),
            None => (rest, None),
        };
        let table = table.trim_matches('"');
        let columns = projection
            .split(", ")
            .map(|item| {
                item.strip_prefix("CAST(\"")
                    .and_then(|item| item.split_once("\" AS text)"))
                    .map(|(column, _)| column)
                    .ok_or_else(|| error("syntax error"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .tables
            .get(table)
            .ok_or_else(|| error(&format!("relation \"{table}\" does not exist")))?;

        let id = match (filter, query.params.first()) {
            (Some(_), Some(Param::String(id))) => Some(id),
            (Some(_), None) => return Err(error("there is no parameter $1")),
            (None, _) => None,
        };
        let limit = filter
            .filter(|filter| filter.ends_with(" LIMIT 1"))
            .map_or(usize::MAX, |_| 1);

        rows.iter()
            .filter(|row| match id {
                Some(id) => row.get("id").and_then(Option::as_ref) == Some(id),
                None => true,
            })
            .take(limit)
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        row.get(*column).cloned().ok_or_else(|| {
                            error(&format!("column \"{column}\" does not exist"))
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

fn error(message: &str) -> Error {
    Error::Execution(sqlx::Error::Protocol(message.to_string()))
}

#[async_trait]
impl Storage for FakeDatabase {
    async fn fetch_optional(&self, query: &SQL) -> Result<Option<TextRow>, Error> {
        Ok(self.run(query)?.into_iter().next())
    }

    fn fetch_many<'a>(&'a self, query: &'a SQL) -> BoxStream<'a, Result<TextRow, Error>> {
        match self.run(query) {
            Ok(rows) => stream::iter(rows.into_iter().map(Ok)).boxed(),
            Err(err) => stream::once(async { Err(err) }).boxed(),
        }
    }
}
