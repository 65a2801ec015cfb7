use query_engine_sql::sql::{ast, convert::select_to_sql, helpers, string};

fn column(name: &str) -> (ast::ColumnAlias, ast::Expression) {
    helpers::make_text_column(
        ast::ColumnName(name.to_string()),
        helpers::make_column_alias(name.to_string()),
    )
}

#[test]
fn it_converts_simple_select() {
    let select = helpers::table_select(
        vec![column("x")],
        ast::TableName("bamba".to_string()),
    );
    similar_asserts::assert_eq!(
        select_to_sql(&select),
        string::SQL {
            sql: "SELECT CAST(\"x\" AS text) AS \"x\" FROM \"bamba\"".to_string(),
            params: vec![],
            param_index: 0,
        }
    );
}

#[test]
fn it_binds_filter_values_as_parameters() {
    let mut select = helpers::table_select(
        vec![column("name"), column("email")],
        ast::TableName("user".to_string()),
    );
    select.where_ = ast::Where(helpers::text_equals(
        ast::ColumnName("id".to_string()),
        "1' OR '1'='1".to_string(),
    ));
    select.limit.limit = Some(1);

    let sql = select_to_sql(&select);

    insta::assert_snapshot!(
        sql.sql,
        @r#"SELECT CAST("name" AS text) AS "name", CAST("email" AS text) AS "email" FROM "user" WHERE (CAST("id" AS text) = $1) LIMIT 1"#
    );
    assert_eq!(
        sql.params,
        vec![string::Param::String("1' OR '1'='1".to_string())]
    );
}

#[test]
fn it_escapes_quotes_inside_identifiers() {
    let select = helpers::table_select(
        vec![column("we\"ird")],
        ast::TableName("t\"; DROP TABLE x; --".to_string()),
    );
    insta::assert_snapshot!(
        select_to_sql(&select).sql,
        @r#"SELECT CAST("we""ird" AS text) AS "we""ird" FROM "t""; DROP TABLE x; --""#
    );
}

#[test]
fn it_renders_select_1() {
    assert_eq!(select_to_sql(&helpers::select_1()).sql, "SELECT 1");
}

#[test]
fn it_omits_an_empty_where() {
    let mut select = helpers::table_select(vec![column("id")], ast::TableName("post".to_string()));
    select.where_ = ast::Where(helpers::empty_where());
    select.limit.limit = Some(1);

    insta::assert_snapshot!(
        select_to_sql(&select).sql,
        @r#"SELECT CAST("id" AS text) AS "id" FROM "post" LIMIT 1"#
    );
}
