//! Build the execution plans for single-record and multi-record lookups.

use async_graphql::Value;

use query_engine_sql::sql::{ast, execution_plan::ExecutionPlan, helpers};

use super::context::ResolutionContext;
use super::error::Error;
use super::identifier;
use super::relation;
use super::selection;

/// The argument naming the record to fetch in a single-record lookup.
pub const ID_ARGUMENT: &str = "id";

/// Translate a lookup of one record of `type_name` by its `id` argument.
///
/// The statement reads at most one row even when several match.
pub fn translate_single(
    type_name: &str,
    context: &ResolutionContext,
) -> Result<ExecutionPlan, Error> {
    let mut plan = translate_multiple(type_name, context)?;
    let id = id_argument(context)?;

    plan.select.where_ = ast::Where(helpers::text_equals(
        identifier::column_name(selection::DEFAULT_FIELD)?,
        id,
    ));
    plan.select.limit.limit = Some(1);
    Ok(plan)
}

/// Translate a scan of every record of `type_name`.
pub fn translate_multiple(
    type_name: &str,
    context: &ResolutionContext,
) -> Result<ExecutionPlan, Error> {
    let fields = selection::or_default(selection::requested_fields(
        context.fields.iter().copied(),
    ));
    let relation = relation::derive_table_name(type_name);
    let table = identifier::table_name(&relation)?;

    let select_list = fields
        .iter()
        .map(|field| {
            Ok(helpers::make_text_column(
                identifier::column_name(field)?,
                helpers::make_column_alias(field.clone()),
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(ExecutionPlan {
        root_table: relation,
        fields,
        select: helpers::table_select(select_list, table),
    })
}

/// Read the identifier argument as text. `ID` values may arrive as strings or
/// as integers, depending on how the client wrote them.
fn id_argument(context: &ResolutionContext) -> Result<String, Error> {
    match context.argument(ID_ARGUMENT) {
        None | Some(Value::Null) => Err(Error::ArgumentNotFound(ID_ARGUMENT.to_string())),
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) if id.is_i64() || id.is_u64() => Ok(id.to_string()),
        Some(other) => Err(Error::InvalidArgument {
            name: ID_ARGUMENT.to_string(),
            expected: "a string or an integer",
            found: other.to_string(),
        }),
    }
}
