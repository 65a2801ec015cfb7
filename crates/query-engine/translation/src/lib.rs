//! Translate a GraphQL selection on a declared type into a SQL execution plan.

pub mod translation;
