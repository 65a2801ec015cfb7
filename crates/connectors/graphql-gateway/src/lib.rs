pub mod binding;
pub mod health;
pub mod query;
pub mod routes;
pub mod scalars;
pub mod schema;
pub mod state;
