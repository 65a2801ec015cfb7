//! Building blocks for the SQL statements we send to the database.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;
