//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::helpers;
use super::string::*;

/// Render a SELECT statement into SQL text and its bound parameters.
pub fn select_to_sql(select: &Select) -> SQL {
    let mut sql = SQL::new();
    select.to_sql(&mut sql);
    sql
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            SelectList::SelectList(select_list) => {
                for (index, (col, expr)) in select_list.iter().enumerate() {
                    expr.to_sql(sql);
                    sql.append_syntax(" AS ");
                    col.to_sql(sql);
                    if index < (select_list.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
            }
            SelectList::Select1 => {
                sql.append_syntax("1");
            }
        }
    }
}

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("SELECT ");

        self.select_list.to_sql(sql);

        if let Some(from) = &self.from {
            sql.append_syntax(" ");
            from.to_sql(sql);
        }

        self.where_.to_sql(sql);

        self.limit.to_sql(sql);
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("FROM ");
        match &self {
            From::Table { reference } => reference.to_sql(sql),
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(expression) = self;
        if *expression != helpers::empty_where() {
            sql.append_syntax(" WHERE ");
            expression.to_sql(sql);
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::ColumnReference(column_reference) => column_reference.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                sql.append_syntax("(");
                left.to_sql(sql);
                operator.to_sql(sql);
                right.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::Cast { expression, r#type } => {
                sql.append_syntax("CAST(");
                expression.to_sql(sql);
                sql.append_syntax(" AS ");
                r#type.to_sql(sql);
                sql.append_syntax(")");
            }
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryOperator::Equals => sql.append_syntax(" = "),
        }
    }
}

impl ScalarType {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ScalarType::Text => sql.append_syntax("text"),
        }
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Value::String(s) => sql.append_param(Param::String(s.clone())),
            Value::True => sql.append_syntax("true"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(limit) = self.limit {
            sql.append_syntax(" LIMIT ");
            sql.append_syntax(format!("{limit}").as_str());
        }
    }
}

// names
impl TableReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            TableReference::DBTable { table } => table.to_sql(sql),
        }
    }
}

impl TableName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let TableName(name) = self;
        sql.append_identifier(name);
    }
}

impl ColumnReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ColumnReference::Unqualified(name) => name.to_sql(sql),
        }
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = self;
        sql.append_identifier(name);
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}
