//! 持久化实现

mod memory;
mod postgres;
mod converters;
mod rows;

pub use memory::InMemoryBankAccountRepository;
pub use postgres::PostgresBankAccountRepository;

use std::sync::Arc;

use cuba_adapter_postgres::{create_pool, PostgresConfig};
use cuba_config::{AppConfig, StoreBackend};
use cuba_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use tracing::info;

use crate::domain::repositories::BankAccountRepository;

/// 按配置创建仓储
pub async fn build_repository(config: &AppConfig) -> AppResult<Arc<dyn BankAccountRepository>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory BankAccount store");
            Ok(Arc::new(InMemoryBankAccountRepository::new()))
        }
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::internal("Postgres store requires database config"))?;

            let pg_config = PostgresConfig::new(database.url.expose_secret().clone())
                .with_max_connections(database.max_connections);
            let pool = create_pool(&pg_config).await?;

            let repo = PostgresBankAccountRepository::new(pool);
            repo.ensure_schema().await?;
            info!("Using PostgreSQL BankAccount store");
            Ok(Arc::new(repo))
        }
    }
}
