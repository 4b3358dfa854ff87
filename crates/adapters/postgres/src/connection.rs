//! PostgreSQL 连接管理

use cuba_common::{RetryConfig, with_retry};
use cuba_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// PostgreSQL 连接池配置
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            retry: RetryConfig::default(),
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// 创建 PostgreSQL 连接池（连接失败时按配置重试）
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    let pool = with_retry(&config.retry, "postgres_connect", || {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(&config.url)
    })
    .await
    .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))?;

    info!(
        max_connections = config.max_connections,
        "PostgreSQL pool created"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/bank")
            .with_max_connections(25)
            .with_retry(RetryConfig::new(1, Duration::from_millis(1), Duration::from_millis(1)));

        assert_eq!(config.url, "postgres://localhost/bank");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[tokio::test]
    async fn test_create_pool_reports_database_error() {
        let mut config = PostgresConfig::new("postgres://nobody@127.0.0.1:1/none")
            .with_retry(RetryConfig::new(1, Duration::from_millis(1), Duration::from_millis(1)));
        config.connect_timeout = Duration::from_millis(200);

        let err = create_pool(&config).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
