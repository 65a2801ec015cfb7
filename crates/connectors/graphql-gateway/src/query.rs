//! Resolve the root fields of a query: plan the statement, then run it.

use tracing::{info_span, Instrument};

use query_engine_execution::record::Record;
use query_engine_execution::storage::Storage;
use query_engine_translation::translation::context::ResolutionContext;

/// Anything that can go wrong resolving a root field.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Translation(#[from] query_engine_translation::translation::error::Error),
    #[error("{0}")]
    Execution(#[from] query_engine_execution::error::Error),
}

/// Fetch the record of `type_name` named by the `id` argument.
///
/// `Ok(None)` means no such record exists.
pub async fn resolve_single<S: Storage + ?Sized>(
    storage: &S,
    type_name: &str,
    context: &ResolutionContext<'_>,
) -> Result<Option<Record>, Error> {
    let plan = async {
        query_engine_translation::translation::query::translate_single(type_name, context)
            .map_err(|err| {
                tracing::error!("{}", err);
                err
            })
    }
    .instrument(info_span!("Plan query", type_name))
    .await?;

    let record = query_engine_execution::query::execute_single(storage, &plan)
        .instrument(info_span!("Execute query"))
        .await
        .map_err(|err| {
            tracing::error!("{}", err);
            err
        })?;

    Ok(record)
}

/// Fetch every record of `type_name`.
pub async fn resolve_multiple<S: Storage + ?Sized>(
    storage: &S,
    type_name: &str,
    context: &ResolutionContext<'_>,
) -> Result<Vec<Record>, Error> {
    let plan = async {
        query_engine_translation::translation::query::translate_multiple(type_name, context)
            .map_err(|err| {
                tracing::error!("{}", err);
                err
            })
    }
    .instrument(info_span!("Plan query", type_name))
    .await?;

    let records = query_engine_execution::query::execute_multiple(storage, &plan)
        .instrument(info_span!("Execute query"))
        .await
        .map_err(|err| {
            tracing::error!("{}", err);
            err
        })?;

    Ok(records)
}
