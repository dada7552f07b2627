//! Persistence backend connection configuration.

use serde::{Deserialize, Serialize};

/// PostgreSQL connection settings.
///
/// The folder hierarchy is memory-only; this section configures the
/// optional backend connection that the `filing` binary can verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Whether the binary should connect to the backend at all.
    #[serde(default)]
    pub enabled: bool,
    /// Server host name.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login role.
    #[serde(default = "default_user")]
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,
    /// libpq-style SSL mode: `disable`, `allow`, `prefer`, `require`,
    /// `verify-ca` or `verify-full`.
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            ssl_mode: default_ssl_mode(),
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_database() -> String {
    "filing".to_string()
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}
