//! The information a resolver hands to the translation: arguments and the raw selection.

use std::collections::BTreeMap;

use async_graphql::parser::types::Field;
use async_graphql::Value;

/// Arguments supplied by the caller, keyed by argument name.
pub type Arguments = BTreeMap<String, Value>;

/// Everything a single resolution needs to know about the incoming request.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext<'a> {
    /// Caller-supplied arguments, already coerced by the GraphQL engine.
    pub arguments: Arguments,
    /// The top-level field nodes being resolved. Their selection sets
    /// determine which columns are read.
    pub fields: Vec<&'a Field>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(arguments: Arguments, fields: Vec<&'a Field>) -> Self {
        ResolutionContext { arguments, fields }
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}
