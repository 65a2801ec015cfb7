//! Execute an execution plan against the database.

use futures_util::TryStreamExt;

use query_engine_sql::sql;

use crate::error::Error;
use crate::record::Record;
use crate::storage::Storage;

/// Execute a single-record plan. `Ok(None)` means no row matched.
pub async fn execute_single<S: Storage + ?Sized>(
    storage: &S,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<Option<Record>, Error> {
    let query = plan.query_sql();
    log_query(plan, &query);

    storage
        .fetch_optional(&query)
        .await?
        .map(|row| Record::from_row(&plan.fields, row))
        .transpose()
}

/// Execute a multi-record plan, producing one record per row in the order the
/// database returned them.
pub async fn execute_multiple<S: Storage + ?Sized>(
    storage: &S,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<Vec<Record>, Error> {
    let query = plan.query_sql();
    log_query(plan, &query);

    // the stream owns the cursor; leaving this function by any path drops it
    let mut rows = storage.fetch_many(&query);
    let mut records = vec![];
    while let Some(row) = rows.try_next().await? {
        records.push(Record::from_row(&plan.fields, row)?);
    }
    Ok(records)
}

fn log_query(plan: &sql::execution_plan::ExecutionPlan, query: &sql::string::SQL) {
    tracing::info!(
        table = %plan.root_table,
        generated_sql = %query.sql,
        params = ?&query.params,
        "executing query"
    );
}
