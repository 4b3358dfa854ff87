//! REST 载荷与领域对象之间的转换

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::BankAccount;
use crate::domain::enums::AccountStatus;
use crate::domain::value_objects::{BankAccountId, CustomerId, CustomerRef};

/// 银行账户载荷
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub created: Option<NaiveDate>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub status: Option<AccountStatus>,
    #[serde(default)]
    pub customer: Option<CustomerDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: i64,
}

impl From<BankAccountDto> for BankAccount {
    fn from(dto: BankAccountDto) -> Self {
        let mut account = BankAccount::new();
        account.set_id(dto.id.map(BankAccountId::from_uuid));
        account.set_created(dto.created);
        account.set_balance(dto.balance);
        account.set_status(dto.status);
        account.set_customer(dto.customer.map(|c| CustomerRef::new(CustomerId(c.id))));
        account
    }
}

impl From<BankAccount> for BankAccountDto {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id().map(|id| id.0),
            created: account.created(),
            balance: account.balance(),
            status: account.status(),
            customer: account.customer().map(|c| CustomerDto { id: c.id.0 }),
        }
    }
}
