//! 银行账户业务服务

use std::sync::Arc;

use cuba_common::{PagedResult, Pagination};
use cuba_errors::{AppError, AppResult};
use cuba_ports::{PageableRepository, Repository};
use tracing::{debug, warn};

use crate::domain::entities::BankAccount;
use crate::domain::repositories::{sort_fields, BankAccountRepository};
use crate::domain::value_objects::BankAccountId;

/// 操作计数指标名
pub const OPERATIONS_METRIC: &str = "bank_account_operations_total";

fn record_operation(operation: &'static str) {
    metrics::counter!(OPERATIONS_METRIC, "operation" => operation).increment(1);
}

/// 银行账户服务
///
/// 包装仓储，每个操作一次仓储往返（`partial_update` 为两次）。
pub struct BankAccountService {
    repo: Arc<dyn BankAccountRepository>,
}

impl BankAccountService {
    pub fn new(repo: Arc<dyn BankAccountRepository>) -> Self {
        Self { repo }
    }

    /// 保存账户（新增或覆盖），返回带 ID 的账户
    pub async fn save(&self, account: BankAccount) -> AppResult<BankAccount> {
        debug!(%account, "Request to save BankAccount");
        record_operation("save");
        self.repo.save(account).await
    }

    /// 整体替换，空字段会写为空
    pub async fn update(&self, account: BankAccount) -> AppResult<BankAccount> {
        debug!(%account, "Request to update BankAccount");
        record_operation("update");
        self.repo.save(account).await
    }

    /// 部分更新
    ///
    /// 只合并 `patch` 中非空的 `created`、`balance`、`status`。
    /// 账户不存在时返回 `None` 且不写入。
    ///
    /// 读取与写回之间没有加锁，同一账户的并发部分更新以最后写入为准。
    pub async fn partial_update(&self, patch: BankAccount) -> AppResult<Option<BankAccount>> {
        debug!(%patch, "Request to partially update BankAccount");
        record_operation("partial_update");

        let Some(id) = patch.id().copied() else {
            warn!("Partial update without id");
            return Err(AppError::validation("Partial update requires an id"));
        };

        let Some(mut existing) = self.repo.find_by_id(&id).await? else {
            debug!(%id, "BankAccount not found, nothing to update");
            return Ok(None);
        };

        existing.merge_from(&patch);
        let saved = self.repo.save(existing).await?;
        Ok(Some(saved))
    }

    /// 分页查询
    pub async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<BankAccount>> {
        debug!(
            page = pagination.page,
            page_size = pagination.page_size,
            "Request to get all BankAccounts"
        );
        record_operation("find_all");
        sort_fields(pagination)?;
        self.repo.find_all(pagination).await
    }

    /// 按 ID 查询
    pub async fn find_one(&self, id: &BankAccountId) -> AppResult<Option<BankAccount>> {
        debug!(%id, "Request to get BankAccount");
        record_operation("find_one");
        self.repo.find_by_id(id).await
    }

    /// 按 ID 删除，ID 不存在时不报错
    pub async fn delete(&self, id: &BankAccountId) -> AppResult<()> {
        debug!(%id, "Request to delete BankAccount");
        record_operation("delete");
        self.repo.delete_by_id(id).await
    }

    pub async fn exists(&self, id: &BankAccountId) -> AppResult<bool> {
        self.repo.exists_by_id(id).await
    }

    /// 账户总数（健康检查使用）
    pub async fn count(&self) -> AppResult<u64> {
        self.repo.count().await
    }
}
