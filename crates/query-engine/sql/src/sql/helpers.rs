//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::True)
}

/// An empty `LIMIT` clause.
pub fn empty_limit() -> Limit {
    Limit { limit: None }
}

// Aliasing //

/// Generate a column expression which reads the column as nullable text.
pub fn make_text_column(name: ColumnName, alias: ColumnAlias) -> (ColumnAlias, Expression) {
    (
        alias,
        Expression::Cast {
            expression: Box::new(Expression::ColumnReference(ColumnReference::Unqualified(
                name,
            ))),
            r#type: ScalarType::Text,
        },
    )
}

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

// Filters //

/// `CAST(<column> AS text) = $n`, comparing a column against a bound text parameter.
pub fn text_equals(column: ColumnName, value: String) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(Expression::Cast {
            expression: Box::new(Expression::ColumnReference(ColumnReference::Unqualified(
                column,
            ))),
            r#type: ScalarType::Text,
        }),
        operator: BinaryOperator::Equals,
        right: Box::new(Expression::Value(Value::String(value))),
    }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        select_list: SelectList::SelectList(select_list),
        from: None,
        where_: Where(empty_where()),
        limit: empty_limit(),
    }
}

/// Build a select of the given columns from a single table.
pub fn table_select(select_list: Vec<(ColumnAlias, Expression)>, table: TableName) -> Select {
    Select {
        from: Some(From::Table {
            reference: TableReference::DBTable { table },
        }),
        ..simple_select(select_list)
    }
}

/// `SELECT 1`, used to check that the database is reachable.
pub fn select_1() -> Select {
    Select {
        select_list: SelectList::Select1,
        ..simple_select(vec![])
    }
}
