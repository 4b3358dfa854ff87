//! PostgreSQL repository implementation

use async_trait::async_trait;
use cuba_common::{PagedResult, Pagination};
use cuba_errors::{AppError, AppResult};
use cuba_ports::{PageableRepository, Repository};
use sqlx::PgPool;
use tracing::info;

use crate::domain::entities::{BankAccount, BankAccountSortField};
use crate::domain::repositories::sort_fields;
use crate::domain::value_objects::BankAccountId;

use super::converters::bank_account_from_row;
use super::rows::BankAccountRow;

const SCHEMA: &str = include_str!("schema.sql");

const SELECT_COLUMNS: &str = "SELECT id, created, balance, status, customer_id FROM bank_account";

pub struct PostgresBankAccountRepository {
    pool: PgPool,
}

impl PostgresBankAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 建表（幂等）
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("初始化 bank_account 表失败: {}", e)))?;

        info!("bank_account schema ready");
        Ok(())
    }
}

fn column(field: BankAccountSortField) -> &'static str {
    match field {
        BankAccountSortField::Id => "id",
        BankAccountSortField::Created => "created",
        BankAccountSortField::Balance => "balance",
        BankAccountSortField::Status => "status",
    }
}

/// 生成 ORDER BY 子句，列名只来自白名单
fn order_by(fields: &[(BankAccountSortField, bool)]) -> String {
    let mut clauses: Vec<String> = fields
        .iter()
        .map(|(field, descending)| {
            let direction = if *descending {
                "DESC NULLS LAST"
            } else {
                "ASC NULLS FIRST"
            };
            format!("{} {}", column(*field), direction)
        })
        .collect();
    clauses.push("id ASC".to_string());
    clauses.join(", ")
}

#[async_trait]
impl Repository<BankAccount, BankAccountId> for PostgresBankAccountRepository {
    async fn find_by_id(&self, id: &BankAccountId) -> AppResult<Option<BankAccount>> {
        let row = sqlx::query_as::<_, BankAccountRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询银行账户失败: {}", e)))?;

        row.map(bank_account_from_row).transpose()
    }

    async fn save(&self, account: BankAccount) -> AppResult<BankAccount> {
        let id = account.id().copied().unwrap_or_default();

        let row = sqlx::query_as::<_, BankAccountRow>(
            r#"
            INSERT INTO bank_account (id, created, balance, status, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                created = EXCLUDED.created,
                balance = EXCLUDED.balance,
                status = EXCLUDED.status,
                customer_id = EXCLUDED.customer_id
            RETURNING id, created, balance, status, customer_id
            "#,
        )
        .bind(id.0)
        .bind(account.created())
        .bind(account.balance())
        .bind(account.status().map(|s| s.as_str()))
        .bind(account.customer().map(|c| c.id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("保存银行账户失败: {}", e)))?;

        bank_account_from_row(row)
    }

    async fn delete_by_id(&self, id: &BankAccountId) -> AppResult<()> {
        sqlx::query("DELETE FROM bank_account WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("删除银行账户失败: {}", e)))?;

        Ok(())
    }

    async fn exists_by_id(&self, id: &BankAccountId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bank_account WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询银行账户失败: {}", e)))
    }
}

#[async_trait]
impl PageableRepository<BankAccount, BankAccountId> for PostgresBankAccountRepository {
    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<BankAccount>> {
        let fields = sort_fields(pagination)?;
        let total = self.count().await?;

        let sql = format!(
            "{} ORDER BY {} LIMIT $1 OFFSET $2",
            SELECT_COLUMNS,
            order_by(&fields)
        );
        let rows = sqlx::query_as::<_, BankAccountRow>(&sql)
            .bind(i64::from(pagination.page_size))
            .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询银行账户列表失败: {}", e)))?;

        let items = rows
            .into_iter()
            .map(bank_account_from_row)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PagedResult::new(items, total, pagination))
    }

    async fn count(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bank_account")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("统计银行账户失败: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_default_is_id() {
        assert_eq!(order_by(&[]), "id ASC");
    }

    #[test]
    fn test_order_by_nulls_placement() {
        let clause = order_by(&[
            (BankAccountSortField::Balance, true),
            (BankAccountSortField::Created, false),
        ]);
        assert_eq!(
            clause,
            "balance DESC NULLS LAST, created ASC NULLS FIRST, id ASC"
        );
    }
}
