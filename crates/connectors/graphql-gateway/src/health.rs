//! Health check endpoint for the gateway.

use query_engine_execution::storage::Storage;
use query_engine_sql::sql;

/// Health check errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("health check failed: {0}")]
    Storage(#[from] query_engine_execution::error::Error),
    #[error("health check returned no rows")]
    NoRows,
}

/// Check that the database answers a trivial query.
pub async fn health_check<S: Storage + ?Sized>(storage: &S) -> Result<(), Error> {
    let query = sql::convert::select_to_sql(&sql::helpers::select_1());
    match storage.fetch_optional(&query).await? {
        Some(_) => Ok(()),
        None => Err(Error::NoRows),
    }
}
