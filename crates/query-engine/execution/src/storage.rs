//! The storage access the executor relies on, and its PostgreSQL implementation.

use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::Row;

use query_engine_sql::sql;

use crate::error::Error;
use crate::metrics::Metrics;
use crate::record::TextRow;

/// Something that can run our statements and hand back rows of nullable text.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Run a statement and return its first row, if there is one.
    async fn fetch_optional(&self, query: &sql::string::SQL) -> Result<Option<TextRow>, Error>;

    /// Run a statement and stream its rows in the order the database returns them.
    ///
    /// Dropping the stream releases the underlying cursor and connection.
    fn fetch_many<'a>(
        &'a self,
        query: &'a sql::string::SQL,
    ) -> BoxStream<'a, Result<TextRow, Error>>;

    /// Refresh whatever gauges this storage can report on.
    fn report_metrics(&self, _metrics: &Metrics) {}
}

#[async_trait]
impl Storage for PgPool {
    async fn fetch_optional(&self, query: &sql::string::SQL) -> Result<Option<TextRow>, Error> {
        let row = build_query_with_params(query).fetch_optional(self).await?;
        row.as_ref().map(decode_text_columns).transpose()
    }

    fn fetch_many<'a>(
        &'a self,
        query: &'a sql::string::SQL,
    ) -> BoxStream<'a, Result<TextRow, Error>> {
        build_query_with_params(query)
            .fetch(self)
            .map(|row| row.map_err(Error::Execution).and_then(|row| decode_text_columns(&row)))
            .boxed()
    }

    fn report_metrics(&self, metrics: &Metrics) {
        metrics.update_pool_metrics(self);
    }
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
fn build_query_with_params(
    query: &sql::string::SQL,
) -> sqlx::query::Query<'_, sqlx::Postgres, PgArguments> {
    let sqlx_query = sqlx::query(query.sql.as_str());

    query
        .params
        .iter()
        .fold(sqlx_query, |sqlx_query, param| match param {
            sql::string::Param::String(s) => sqlx_query.bind(s),
        })
}

/// Read every column of the row as nullable text.
fn decode_text_columns(row: &PgRow) -> Result<TextRow, Error> {
    (0..row.len())
        .map(|column| {
            row.try_get::<Option<String>, _>(column)
                .map_err(|source| Error::Decode { column, source })
        })
        .collect()
}
