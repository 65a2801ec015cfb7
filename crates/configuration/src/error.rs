//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use crate::environment;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported configuration version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning a parsed configuration into the
/// configuration the gateway runs with.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid connection URI: {0}")]
    ConnectionUri(#[from] environment::Error),
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("unable to serialize the configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
