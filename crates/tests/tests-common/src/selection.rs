//! Parse query documents the way the GraphQL engine hands them to resolvers.

use async_graphql::parser::parse_query;
use async_graphql::parser::types::{DocumentOperations, ExecutableDocument, Field, Selection};

pub fn parse(source: &str) -> ExecutableDocument {
    parse_query(source).expect("query should parse")
}

/// The top-level fields of the (single) operation in the document.
pub fn root_fields(document: &ExecutableDocument) -> Vec<&Field> {
    let operation = match &document.operations {
        DocumentOperations::Single(operation) => operation,
        DocumentOperations::Multiple(_) => panic!("expected a single operation"),
    };
    operation
        .node
        .selection_set
        .node
        .items
        .iter()
        .filter_map(|selection| match &selection.node {
            Selection::Field(field) => Some(&field.node),
            _ => None,
        })
        .collect()
}
