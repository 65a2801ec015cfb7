//! Translate the incoming selection and arguments into an execution plan.

pub mod context;
pub mod error;
pub mod identifier;
pub mod query;
pub mod relation;
pub mod selection;
