//! Extract the requested field names from a selection tree.
//!
//! Records are flat, so only the immediate children of each top-level field are
//! considered. A nested object selection contributes its own name and nothing
//! below it. Fragment spreads and inline fragments are not expanded: they are
//! skipped, as are introspection fields such as `__typename`.

use async_graphql::parser::types::{Field, Selection};

/// The field read when the selection names nothing.
pub const DEFAULT_FIELD: &str = "id";

/// The names of the fields selected directly below the given fields, in the
/// order they appear in the query.
pub fn requested_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Vec<String> {
    fields
        .into_iter()
        .flat_map(|field| field.selection_set.node.items.iter())
        .filter_map(|selection| match &selection.node {
            Selection::Field(child) => Some(child.node.name.node.as_str()),
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => None,
        })
        .filter(|name| !name.starts_with("__"))
        .map(str::to_string)
        .collect()
}

/// Fall back to [`DEFAULT_FIELD`] when nothing was requested.
pub fn or_default(fields: Vec<String>) -> Vec<String> {
    if fields.is_empty() {
        vec![DEFAULT_FIELD.to_string()]
    } else {
        fields
    }
}
