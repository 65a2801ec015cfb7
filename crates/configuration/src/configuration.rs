//! Configuration for the gateway.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::environment::{self, Environment, Variable};
use crate::error::{
    MakeRuntimeConfigurationError, ParseConfigurationError, WriteParsedConfigurationError,
};
use crate::values::{ConnectionUri, PoolSettings, Secret};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";
pub const DEFAULT_SCHEMA_FILENAME: &str = "schema.graphql";
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "DATABASE_URL";
pub const DEFAULT_CONNECTION_URI: &str = "postgres://root@localhost:26257/layerg?sslmode=disable";

/// The configuration as it is written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // Which version of the configuration format are we using
    pub version: u32,
    // Connection string for a Postgres-compatible database
    #[serde(default = "default_connection_uri")]
    pub connection_uri: ConnectionUri,
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    #[serde(default)]
    pub pool_settings: PoolSettings,
    /// The GraphQL schema declaring the types to serve, relative to the
    /// configuration directory.
    #[serde(default = "default_schema_file")]
    pub schema_file: PathBuf,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            connection_uri: default_connection_uri(),
            pool_settings: PoolSettings::default(),
            schema_file: default_schema_file(),
        }
    }
}

fn default_connection_uri() -> ConnectionUri {
    ConnectionUri(Secret::FromEnvironment {
        variable: Variable::from(DEFAULT_CONNECTION_URI_VARIABLE),
    })
}

fn default_schema_file() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_FILENAME)
}

/// The configuration the gateway runs with, with every secret resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
    pub schema_path: PathBuf,
}

/// Read the configuration from a directory. A directory without a
/// configuration file gets the initial configuration.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    if !fs::try_exists(&configuration_file).await? {
        tracing::info!(
            path = %configuration_file.display(),
            "no configuration file found, using the initial configuration"
        );
        return Ok(ParsedConfiguration::initial());
    }

    let contents = fs::read_to_string(&configuration_file).await?;
    let parsed: ParsedConfiguration =
        serde_json::from_str(&contents).map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            found: parsed.version,
            expected: CURRENT_VERSION,
        });
    }

    Ok(parsed)
}

/// Resolve secrets from the environment and anchor relative paths at the
/// configuration directory.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    configuration_dir: impl AsRef<Path>,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri.0 {
        Secret::Plain(uri) => uri,
        Secret::FromEnvironment { variable } => match environment.read(&variable) {
            Ok(uri) => uri,
            Err(environment::Error::VariableNotPresent(_))
                if variable.as_str() == DEFAULT_CONNECTION_URI_VARIABLE =>
            {
                tracing::info!(
                    "{DEFAULT_CONNECTION_URI_VARIABLE} is not set, using default connection string: {DEFAULT_CONNECTION_URI}"
                );
                DEFAULT_CONNECTION_URI.to_string()
            }
            Err(error) => return Err(error.into()),
        },
    };

    Ok(Configuration {
        connection_uri,
        pool_settings: parsed_config.pool_settings,
        schema_path: configuration_dir.as_ref().join(parsed_config.schema_file),
    })
}

/// Write the configuration, and the JSON schema describing it, into a directory.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    fs::create_dir_all(out_dir.as_ref()).await?;

    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::write(
        &configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    let configuration_jsonschema_file_path =
        out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);
    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)? + "\n",
    )
    .await?;

    Ok(())
}
