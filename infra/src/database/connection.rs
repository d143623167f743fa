//! MySQL connection pool with health probing and embedded migrations

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use ov_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Shared handle to the MySQL pool backing both repositories
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect using the pool limits and timeouts in `config`
    ///
    /// A malformed URL is reported as `InfrastructureError::Config` before
    /// any connection is attempted.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid DATABASE_URL: {}", e)))?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            event = "db_pool_connecting",
            "Connecting to MySQL"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "db_pool_failed", "Could not open MySQL pool");
                InfrastructureError::Database(e)
            })?;

        Ok(Self { pool })
    }

    /// Wrap a pool created elsewhere
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, event = "db_health_failed", "MySQL health check failed");
                InfrastructureError::Database(e)
            })?;
        Ok(())
    }

    /// Apply the bundled schema: organizations, outstanding codes and the
    /// issuance log
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!(event = "db_migrated", "Database schema is up to date");
        Ok(())
    }

    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Wait for checked-out connections to return, then close them
    pub async fn close(&self) {
        tracing::info!(stats = %self.get_statistics(), event = "db_pool_closing", "Closing MySQL pool");
        self.pool.close().await;
    }
}

/// Point-in-time pool occupancy
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "open={} idle={} max={}",
            self.connections, self.idle_connections, self.max_connections
        )
    }
}
