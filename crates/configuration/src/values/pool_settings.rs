use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the PostgreSQL connection pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolSettings {
    /// maximum number of pool connections
    #[serde(default = "max_connection_default")]
    pub max_connections: u32,
    /// timeout for acquiring a connection from the pool (seconds)
    #[serde(default = "pool_timeout_default")]
    pub pool_timeout: u64,
    /// idle timeout for releasing a connection from the pool (seconds)
    #[serde(default = "idle_timeout_default")]
    pub idle_timeout: Option<u64>,
    /// maximum lifetime for an individual connection (seconds)
    #[serde(default = "connection_lifetime_default")]
    pub connection_lifetime: Option<u64>,
}

impl PoolSettings {
    pub fn is_default(&self) -> bool {
        self == &PoolSettings::default()
    }
}

impl Default for PoolSettings {
    fn default() -> PoolSettings {
        PoolSettings {
            max_connections: max_connection_default(),
            pool_timeout: pool_timeout_default(),
            idle_timeout: idle_timeout_default(),
            connection_lifetime: connection_lifetime_default(),
        }
    }
}

fn max_connection_default() -> u32 {
    50
}
fn pool_timeout_default() -> u64 {
    600
}
fn idle_timeout_default() -> Option<u64> {
    Some(180)
}
fn connection_lifetime_default() -> Option<u64> {
    Some(600)
}
