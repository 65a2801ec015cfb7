//! Describe the SQL execution plan.

use super::ast;
use super::convert::select_to_sql;
use super::string::SQL;

/// Definition of an execution plan to be run against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    /// The relation the statement reads from, kept for logging.
    pub root_table: String,
    /// The requested field names, in projection order. Each one names the
    /// column at the same position of every row the statement returns.
    pub fields: Vec<String>,
    /// The statement to run.
    pub select: ast::Select,
}

impl ExecutionPlan {
    /// Extract the SQL text and parameters of the plan's statement.
    pub fn query_sql(&self) -> SQL {
        select_to_sql(&self.select)
    }
}
