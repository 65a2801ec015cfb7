//! Bind the declared types to the generic resolvers in a dynamic GraphQL schema.

use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Scalar, Schema,
    SchemaError, TypeRef,
};
use async_graphql::Value;

use query_engine_execution::metrics::Metrics;
use query_engine_execution::record::Record;
use query_engine_execution::storage::Storage;
use query_engine_translation::translation::context::{Arguments, ResolutionContext};
use query_engine_translation::translation::query::ID_ARGUMENT;

use crate::query;
use crate::scalars;
use crate::schema::{DeclaredField, DeclaredType, ScalarKind, TypeRegistry};

pub const QUERY_TYPE: &str = "Query";

/// Build the schema serving every declared type: `user(id: ID!): User` and
/// `users: [User!]!` for a type `User`.
pub fn build_schema(
    registry: &TypeRegistry,
    storage: Arc<dyn Storage>,
    metrics: Metrics,
) -> Result<Schema, SchemaError> {
    let mut query = Object::new(QUERY_TYPE);
    for declared in &registry.types {
        query = query
            .field(single_field(declared, storage.clone(), metrics.clone()))
            .field(multiple_field(declared, storage.clone(), metrics.clone()));
    }

    let mut schema = Schema::build(QUERY_TYPE, None, None)
        .register(query)
        .register(scalars::date_scalar());
    for name in &registry.custom_scalars {
        schema = schema.register(Scalar::new(name));
    }
    for declared in &registry.types {
        schema = schema.register(object_type(declared));
    }
    schema.finish()
}

fn single_field(declared: &DeclaredType, storage: Arc<dyn Storage>, metrics: Metrics) -> Field {
    let type_name = declared.name.clone();
    Field::new(
        declared.single_field_name(),
        TypeRef::named(&declared.name),
        move |ctx| {
            let type_name = type_name.clone();
            let storage = storage.clone();
            let metrics = metrics.clone();
            FieldFuture::new(async move {
                let context = resolution_context(&ctx);
                let result = query::resolve_single(storage.as_ref(), &type_name, &context).await;
                metrics.record_query(&result);
                Ok(result?.map(FieldValue::owned_any))
            })
        },
    )
    .argument(InputValue::new(ID_ARGUMENT, TypeRef::named_nn(TypeRef::ID)))
    .description(format!("Fetch one `{}` by its id", declared.name))
}

fn multiple_field(declared: &DeclaredType, storage: Arc<dyn Storage>, metrics: Metrics) -> Field {
    let type_name = declared.name.clone();
    Field::new(
        declared.multiple_field_name(),
        TypeRef::named_nn_list_nn(&declared.name),
        move |ctx| {
            let type_name = type_name.clone();
            let storage = storage.clone();
            let metrics = metrics.clone();
            FieldFuture::new(async move {
                let context = resolution_context(&ctx);
                let result =
                    query::resolve_multiple(storage.as_ref(), &type_name, &context).await;
                metrics.record_query(&result);
                Ok(Some(FieldValue::list(
                    result?.into_iter().map(FieldValue::owned_any),
                )))
            })
        },
    )
    .description(format!("Fetch every `{}`", declared.name))
}

/// The arguments and selection of the field being resolved.
fn resolution_context<'a>(ctx: &ResolverContext<'a>) -> ResolutionContext<'a> {
    let arguments: Arguments = ctx
        .args
        .as_index_map()
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    ResolutionContext::new(arguments, vec![&ctx.ctx.item.node])
}

fn object_type(declared: &DeclaredType) -> Object {
    let object = declared
        .fields
        .iter()
        .fold(Object::new(&declared.name), |object, field| {
            object.field(record_field(field))
        });
    match &declared.description {
        Some(description) => object.description(description),
        None => object,
    }
}

/// A field of a served type, read from the record its parent resolved.
fn record_field(declared: &DeclaredField) -> Field {
    let type_ref = if declared.nullable {
        TypeRef::named(declared.scalar.type_name())
    } else {
        TypeRef::named_nn(declared.scalar.type_name())
    };
    let name = declared.name.clone();
    let scalar = declared.scalar.clone();
    let field = Field::new(&declared.name, type_ref, move |ctx| {
        let name = name.clone();
        let scalar = scalar.clone();
        FieldFuture::new(async move {
            let record = ctx
                .parent_value
                .downcast_ref::<Record>()
                .ok_or_else(|| async_graphql::Error::new("parent value is not a record"))?;
            let value = match record.get(&name).flatten() {
                Some(text) => coerce(&scalar, text)?,
                None => None,
            };
            Ok(value.map(FieldValue::value))
        })
    });
    match &declared.description {
        Some(description) => field.description(description),
        None => field,
    }
}

/// A column value that does not read as the scalar its field declares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot read {text:?} as {expected}")]
pub struct CoercionError {
    pub text: String,
    pub expected: &'static str,
}

/// Turn a column's text into the declared scalar. Dates that do not parse have
/// no value.
pub fn coerce(scalar: &ScalarKind, text: &str) -> Result<Option<Value>, CoercionError> {
    let error = |expected| CoercionError {
        text: text.to_string(),
        expected,
    };
    match scalar {
        ScalarKind::Int => text
            .parse::<i64>()
            .map(|int| Some(Value::Number(int.into())))
            .map_err(|_| error("Int")),
        ScalarKind::Float => text
            .parse::<f64>()
            .ok()
            .and_then(async_graphql::Number::from_f64)
            .map(|float| Some(Value::Number(float)))
            .ok_or_else(|| error("Float")),
        ScalarKind::Boolean => match text {
            "true" | "t" => Ok(Some(Value::Boolean(true))),
            "false" | "f" => Ok(Some(Value::Boolean(false))),
            _ => Err(error("Boolean")),
        },
        ScalarKind::Date => {
            Ok(scalars::from_storage_text(text).map(|date| scalars::serialize(&date)))
        }
        ScalarKind::Id | ScalarKind::String | ScalarKind::Custom(_) => {
            Ok(Some(Value::String(text.to_string())))
        }
    }
}
