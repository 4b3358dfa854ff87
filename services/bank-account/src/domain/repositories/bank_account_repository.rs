//! 银行账户仓储接口

use cuba_common::Pagination;
use cuba_errors::{AppError, AppResult};
use cuba_ports::PageableRepository;

use crate::domain::entities::{BankAccount, BankAccountSortField};
use crate::domain::value_objects::BankAccountId;

/// 银行账户仓储
///
/// 以账户 ID 为键。`save` 在账户没有 ID 时分配新 ID，已有 ID 时插入或整体覆盖。
/// `delete_by_id` 对不存在的 ID 不报错。
pub trait BankAccountRepository: PageableRepository<BankAccount, BankAccountId> {}

impl<T> BankAccountRepository for T where T: PageableRepository<BankAccount, BankAccountId> {}

/// 解析分页参数中的排序字段，未知字段返回校验错误
pub fn sort_fields(pagination: &Pagination) -> AppResult<Vec<(BankAccountSortField, bool)>> {
    pagination
        .sort
        .iter()
        .map(|sort| {
            let field = sort
                .property
                .parse::<BankAccountSortField>()
                .map_err(AppError::validation)?;
            Ok((field, sort.direction.is_descending()))
        })
        .collect()
}
