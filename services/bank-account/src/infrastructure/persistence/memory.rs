//! 内存仓储实现

use std::collections::HashMap;

use async_trait::async_trait;
use cuba_common::{PagedResult, Pagination};
use cuba_errors::AppResult;
use cuba_ports::{PageableRepository, Repository};
use tokio::sync::RwLock;

use crate::domain::entities::{BankAccount, BankAccountSortField};
use crate::domain::repositories::sort_fields;
use crate::domain::value_objects::BankAccountId;

/// 基于 `HashMap` 的仓储，用于开发环境和测试
#[derive(Debug, Default)]
pub struct InMemoryBankAccountRepository {
    accounts: RwLock<HashMap<BankAccountId, BankAccount>>,
}

impl InMemoryBankAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BankAccount, BankAccountId> for InMemoryBankAccountRepository {
    async fn find_by_id(&self, id: &BankAccountId) -> AppResult<Option<BankAccount>> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn save(&self, mut account: BankAccount) -> AppResult<BankAccount> {
        let id = match account.id() {
            Some(id) => *id,
            None => {
                let id = BankAccountId::new();
                account.set_id(Some(id));
                id
            }
        };

        self.accounts.write().await.insert(id, account.clone());
        Ok(account)
    }

    async fn delete_by_id(&self, id: &BankAccountId) -> AppResult<()> {
        self.accounts.write().await.remove(id);
        Ok(())
    }

    async fn exists_by_id(&self, id: &BankAccountId) -> AppResult<bool> {
        Ok(self.accounts.read().await.contains_key(id))
    }
}

#[async_trait]
impl PageableRepository<BankAccount, BankAccountId> for InMemoryBankAccountRepository {
    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<BankAccount>> {
        let fields = sort_fields(pagination)?;

        let mut accounts: Vec<BankAccount> =
            self.accounts.read().await.values().cloned().collect();

        // 排序条件相同时按 ID 排，保证分页结果稳定
        accounts.sort_by(|a, b| {
            fields
                .iter()
                .map(|(field, descending)| {
                    let ordering = field.compare(a, b);
                    if *descending { ordering.reverse() } else { ordering }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| BankAccountSortField::Id.compare(a, b))
        });

        let total = accounts.len() as u64;
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let items = accounts
            .into_iter()
            .skip(offset)
            .take(pagination.page_size as usize)
            .collect();

        Ok(PagedResult::new(items, total, pagination))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.accounts.read().await.len() as u64)
    }
}
