//! PostgreSQL connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tracing::info;

use filing_core::config::DatabaseConfig;
use filing_core::error::{AppError, ErrorKind};
use filing_core::result::AppResult;

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    ///
    /// Fails with a `Configuration` error for an unknown SSL mode and a
    /// `Database` error when the server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(config)?;

        info!(
            target_db = %describe(config),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Successfully connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Build sqlx connect options from the configured connection parameters.
pub fn connect_options(config: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid ssl_mode '{}'", config.ssl_mode),
            e,
        )
    })?;

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
        .ssl_mode(ssl_mode))
}

/// Describe the connection target with the password masked, for logging.
fn describe(config: &DatabaseConfig) -> String {
    let credentials = if config.password.is_empty() {
        config.user.clone()
    } else {
        format!("{}:****", config.user)
    };
    format!(
        "postgres://{credentials}@{}:{}/{}?sslmode={}",
        config.host, config.port, config.database, config.ssl_mode
    )
}
