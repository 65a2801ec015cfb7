//! Query execution against a PostgreSQL database.

pub mod error;
pub mod metrics;
pub mod query;
pub mod record;
pub mod storage;
