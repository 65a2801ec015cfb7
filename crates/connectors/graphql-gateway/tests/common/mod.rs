//! Common functions used across test cases.
#![allow(dead_code)]

use std::sync::Arc;

use graphql_gateway::schema::{parse_schema_sdl, TypeRegistry};
use graphql_gateway::state::ServerState;
use tests_common::database::FakeDatabase;

pub const SCHEMA: &str = r#"
scalar JSON

"""A registered person"""
type User {
  id: ID!
  name: String
  email: String
  age: Int
  score: Float
  active: Boolean
  createdAt: Date
  settings: JSON
  posts: [Post!]!
}

type Post {
  id: ID!
  title: String!
  authorId: ID
}

type Query {
  user(id: ID!): User
}
"#;

pub fn registry() -> TypeRegistry {
    parse_schema_sdl(SCHEMA).unwrap()
}

/// Two users and no posts table.
pub fn database() -> FakeDatabase {
    FakeDatabase::new().with_table(
        "user",
        &[
            &[
                ("id", Some("1")),
                ("name", Some("Ann")),
                ("email", None),
                ("age", Some("31")),
                ("score", Some("4.5")),
                ("active", Some("t")),
                ("createdat", Some("2024-01-02 03:04:05+00")),
                ("settings", Some(r#"{"theme":"dark"}"#)),
            ],
            &[
                ("id", Some("2")),
                ("name", Some("Bob")),
                ("email", Some("bob@example.com")),
                ("age", None),
                ("score", Some("0.25")),
                ("active", Some("f")),
                ("createdat", Some("2023-12-31")),
                ("settings", None),
            ],
        ],
    )
}

pub fn state(database: Arc<FakeDatabase>) -> ServerState {
    ServerState::new(&registry(), database, prometheus::Registry::new()).unwrap()
}
