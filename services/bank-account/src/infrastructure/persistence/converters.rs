//! 数据库行到领域对象的转换

use cuba_errors::{AppError, AppResult};

use crate::domain::entities::BankAccount;
use crate::domain::enums::AccountStatus;
use crate::domain::value_objects::{BankAccountId, CustomerId, CustomerRef};

use super::rows::BankAccountRow;

/// 将 BankAccountRow 转换为 BankAccount
pub fn bank_account_from_row(row: BankAccountRow) -> AppResult<BankAccount> {
    let status = row
        .status
        .as_deref()
        .map(str::parse::<AccountStatus>)
        .transpose()
        .map_err(AppError::database)?;

    let mut account = BankAccount::new().with_id(BankAccountId::from_uuid(row.id));
    account.set_created(row.created);
    account.set_balance(row.balance);
    account.set_status(status);
    account.set_customer(row.customer_id.map(|id| CustomerRef::new(CustomerId(id))));
    Ok(account)
}
