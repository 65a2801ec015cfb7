//! Configuration for the gateway: where the database is, how to pool
//! connections to it, and which schema file declares the types to serve.

pub mod configuration;
pub mod environment;
pub mod error;
pub mod values;

pub use configuration::{
    make_runtime_configuration, parse_configuration, write_parsed_configuration, Configuration,
    ParsedConfiguration, CONFIGURATION_FILENAME, CONFIGURATION_JSONSCHEMA_FILENAME,
    DEFAULT_CONNECTION_URI, DEFAULT_CONNECTION_URI_VARIABLE,
};
pub use values::{ConnectionUri, PoolSettings, Secret};
