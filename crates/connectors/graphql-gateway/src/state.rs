//! Transient state used by the gateway.
//!
//! This is initialized on startup.

use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info_span, Instrument};

use gateway_configuration::Configuration;
use query_engine_execution::metrics;
use query_engine_execution::storage::Storage;

use crate::binding;
use crate::schema::{self, TypeRegistry};

/// State shared by every request.
#[derive(Clone)]
pub struct ServerState {
    pub schema: async_graphql::dynamic::Schema,
    pub storage: Arc<dyn Storage>,
    pub metrics: metrics::Metrics,
    pub metrics_registry: prometheus::Registry,
}

impl ServerState {
    /// Serve `registry` from `storage`, registering our metrics with `metrics_registry`.
    pub fn new(
        registry: &TypeRegistry,
        storage: Arc<dyn Storage>,
        metrics_registry: prometheus::Registry,
    ) -> Result<ServerState, InitializationError> {
        let mut metrics_registry = metrics_registry;
        let metrics = metrics::Metrics::initialize(&mut metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        let schema = binding::build_schema(registry, storage.clone(), metrics.clone())
            .map_err(InitializationError::BindingError)?;

        Ok(ServerState {
            schema,
            storage,
            metrics,
            metrics_registry,
        })
    }
}

/// Load the schema, create a connection pool and wrap them inside the server state.
pub async fn create_state(configuration: &Configuration) -> Result<ServerState, InitializationError> {
    let registry = schema::load_schema_file(&configuration.schema_path)
        .instrument(info_span!("Load schema"))
        .await
        .map_err(InitializationError::SchemaError)?;

    let pool = create_pool(configuration)
        .instrument(info_span!("Create connection pool"))
        .await?;
    tracing::info!("database connection established");

    ServerState::new(&registry, Arc::new(pool), prometheus::Registry::new())
}

/// Create a connection pool with the configured settings.
/// - <https://docs.rs/sqlx/latest/sqlx/pool/struct.PoolOptions.html>
async fn create_pool(configuration: &Configuration) -> Result<PgPool, InitializationError> {
    let pool_settings = &configuration.pool_settings;

    PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(pool_settings.pool_timeout))
        .idle_timeout(
            pool_settings
                .idle_timeout
                .map(std::time::Duration::from_secs),
        )
        .max_lifetime(
            pool_settings
                .connection_lifetime
                .map(std::time::Duration::from_secs),
        )
        .connect(&configuration.connection_uri)
        .await
        .map_err(InitializationError::UnableToCreatePool)
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(metrics::Error),
    #[error("unable to load schema: {0}")]
    SchemaError(schema::Error),
    #[error("unable to build the GraphQL schema: {0}")]
    BindingError(async_graphql::dynamic::SchemaError),
}
