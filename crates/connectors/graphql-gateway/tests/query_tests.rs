mod common;

use async_graphql::Value;

use graphql_gateway::query::{self, resolve_multiple, resolve_single};
use query_engine_execution::record::Record;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::context::{Arguments, ResolutionContext};
use query_engine_translation::translation::error::Error as TranslationError;
use tests_common::database::FakeDatabase;
use tests_common::selection::{parse, root_fields};

fn id_arguments(id: &str) -> Arguments {
    Arguments::from([("id".to_string(), Value::String(id.to_string()))])
}

fn record(values: &[(&str, Option<&str>)]) -> Record {
    values
        .iter()
        .map(|(field, value)| ((*field).to_string(), value.map(str::to_string)))
        .collect()
}

#[tokio::test]
async fn a_single_record_holds_exactly_the_requested_fields() {
    let database = common::database();
    let document = parse(r#"{ user(id: "1") { name email } }"#);
    let context = ResolutionContext::new(id_arguments("1"), root_fields(&document));

    let result = resolve_single(&database, "User", &context).await.unwrap();

    similar_asserts::assert_eq!(
        result,
        Some(record(&[("name", Some("Ann")), ("email", None)]))
    );
    let statement = database.last_statement().unwrap();
    insta::assert_snapshot!(statement.sql, @r###"SELECT CAST("name" AS text) AS "name", CAST("email" AS text) AS "email" FROM "user" WHERE (CAST("id" AS text) = $1) LIMIT 1"###);
    assert_eq!(statement.params, vec![Param::String("1".to_string())]);
}

#[tokio::test]
async fn a_missing_record_is_not_found_rather_than_an_error() {
    let database = common::database();
    let document = parse(r#"{ user(id: "99") { name } }"#);
    let context = ResolutionContext::new(id_arguments("99"), root_fields(&document));

    let result = resolve_single(&database, "User", &context).await.unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn an_empty_selection_reads_only_the_id() {
    let database = common::database();
    let document = parse(r#"{ user(id: "2") { __typename } }"#);
    let context = ResolutionContext::new(id_arguments("2"), root_fields(&document));

    let result = resolve_single(&database, "User", &context).await.unwrap();

    similar_asserts::assert_eq!(result, Some(record(&[("id", Some("2"))])));
    insta::assert_snapshot!(database.last_statement().unwrap().sql, @r###"SELECT CAST("id" AS text) AS "id" FROM "user" WHERE (CAST("id" AS text) = $1) LIMIT 1"###);
}

#[tokio::test]
async fn the_identifier_is_never_part_of_the_statement_text() {
    let database = common::database();
    let hostile = "1' OR '1'='1";
    let document = parse(r#"{ user(id: "x") { name } }"#);
    let context = ResolutionContext::new(id_arguments(hostile), root_fields(&document));

    let result = resolve_single(&database, "User", &context).await.unwrap();

    assert_eq!(result, None);
    let statement = database.last_statement().unwrap();
    assert!(!statement.sql.contains(hostile));
    assert_eq!(statement.params, vec![Param::String(hostile.to_string())]);
}

#[tokio::test]
async fn multiple_records_keep_storage_order() {
    let database = common::database();
    let document = parse("{ users { id name } }");
    let context = ResolutionContext::new(Arguments::new(), root_fields(&document));

    let result = resolve_multiple(&database, "User", &context).await.unwrap();

    similar_asserts::assert_eq!(
        result,
        vec![
            record(&[("id", Some("1")), ("name", Some("Ann"))]),
            record(&[("id", Some("2")), ("name", Some("Bob"))]),
        ]
    );
    insta::assert_snapshot!(database.last_statement().unwrap().sql, @r###"SELECT CAST("id" AS text) AS "id", CAST("name" AS text) AS "name" FROM "user""###);
}

#[tokio::test]
async fn an_empty_table_is_an_empty_sequence() {
    let database = FakeDatabase::new().with_table("post", &[]);
    let document = parse("{ posts { title } }");
    let context = ResolutionContext::new(Arguments::new(), root_fields(&document));

    let result = resolve_multiple(&database, "Post", &context).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn storage_failures_propagate() {
    let database = FakeDatabase::failing("connection refused");
    let document = parse("{ users { id } }");
    let context = ResolutionContext::new(Arguments::new(), root_fields(&document));

    let result = resolve_multiple(&database, "User", &context).await;

    assert!(matches!(result, Err(query::Error::Execution(_))));
}

#[tokio::test]
async fn a_missing_id_is_rejected_before_anything_runs() {
    let database = common::database();
    let document = parse("{ user { name } }");
    let context = ResolutionContext::new(Arguments::new(), root_fields(&document));

    let result = resolve_single(&database, "User", &context).await;

    assert!(matches!(
        result,
        Err(query::Error::Translation(TranslationError::ArgumentNotFound(_)))
    ));
    assert!(database.statements().is_empty());
}
