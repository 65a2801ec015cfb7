mod common;

use graphql_gateway::schema::{
    load_schema_file, parse_schema_sdl, DeclaredField, DeclaredType, Error, ScalarKind,
};

fn field(name: &str, scalar: ScalarKind, nullable: bool) -> DeclaredField {
    DeclaredField {
        name: name.to_string(),
        description: None,
        scalar,
        nullable,
    }
}

#[test]
fn object_types_other_than_the_root_types_are_served() {
    let registry = parse_schema_sdl(common::SCHEMA).unwrap();

    let names: Vec<&str> = registry.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["User", "Post"]);
    assert_eq!(registry.custom_scalars, vec!["JSON".to_string()]);
}

#[test]
fn only_scalar_fields_are_kept() {
    let registry = parse_schema_sdl(common::SCHEMA).unwrap();

    similar_asserts::assert_eq!(
        registry.get("User").unwrap(),
        &DeclaredType {
            name: "User".to_string(),
            description: Some("A registered person".to_string()),
            fields: vec![
                field("id", ScalarKind::Id, false),
                field("name", ScalarKind::String, true),
                field("email", ScalarKind::String, true),
                field("age", ScalarKind::Int, true),
                field("score", ScalarKind::Float, true),
                field("active", ScalarKind::Boolean, true),
                field("createdAt", ScalarKind::Date, true),
                field("settings", ScalarKind::Custom("JSON".to_string()), true),
            ],
        }
    );
}

#[test]
fn root_fields_are_named_after_the_type() {
    let registry = parse_schema_sdl("type BlogPost { id: ID! }").unwrap();
    let blog_post = registry.get("BlogPost").unwrap();

    assert_eq!(blog_post.single_field_name(), "blogPost");
    assert_eq!(blog_post.multiple_field_name(), "blogPosts");
}

#[test]
fn a_schema_block_names_the_root_types() {
    let registry = parse_schema_sdl(
        "schema { query: Root } type Root { user: User } type User { id: ID! }",
    )
    .unwrap();

    let names: Vec<&str> = registry.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["User"]);
}

#[test]
fn extensions_add_fields_to_the_type_they_extend() {
    let registry =
        parse_schema_sdl("type User { id: ID! } extend type User { name: String }").unwrap();

    similar_asserts::assert_eq!(
        registry.get("User").unwrap().fields,
        vec![
            field("id", ScalarKind::Id, false),
            field("name", ScalarKind::String, true),
        ]
    );
}

#[test]
fn enum_and_list_fields_are_skipped() {
    let registry = parse_schema_sdl(
        "enum Role { ADMIN MEMBER } type User { id: ID! role: Role tags: [String!] }",
    )
    .unwrap();

    similar_asserts::assert_eq!(
        registry.get("User").unwrap().fields,
        vec![field("id", ScalarKind::Id, false)]
    );
}

#[test]
fn over_long_names_are_rejected() {
    let long = "a".repeat(64);

    assert!(matches!(
        parse_schema_sdl(&format!("type User {{ {long}: String }}")),
        Err(Error::InvalidField { .. })
    ));
    assert!(matches!(
        parse_schema_sdl(&format!("type T{long} {{ id: ID! }}")),
        Err(Error::InvalidType { .. })
    ));
}

#[test]
fn types_that_would_share_a_root_field_are_rejected() {
    let result = parse_schema_sdl("type User { id: ID! } type user { id: ID! }");

    match result {
        Err(Error::ConflictingRootField { field, first, second }) => {
            assert_eq!(field, "user");
            assert_eq!(first, "User");
            assert_eq!(second, "user");
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn a_schema_without_object_types_is_rejected() {
    assert!(matches!(
        parse_schema_sdl("type Query { version: String }"),
        Err(Error::NoTypes)
    ));
}

#[test]
fn syntax_errors_are_reported() {
    assert!(matches!(
        parse_schema_sdl("type User {"),
        Err(Error::Parse(_))
    ));
}

#[tokio::test]
async fn schema_files_are_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.graphql");
    std::fs::write(&path, common::SCHEMA).unwrap();

    let registry = load_schema_file(&path).await.unwrap();

    assert_eq!(registry, common::registry());
}

#[tokio::test]
async fn a_missing_schema_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = load_schema_file(dir.path().join("schema.graphql")).await;

    assert!(matches!(result, Err(Error::Io { .. })));
}
