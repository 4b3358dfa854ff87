//! 强类型 ID 定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// 银行账户 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct BankAccountId(pub Uuid);

impl BankAccountId {
    pub fn new() -> Self {
        Self(cuba_common::utils::new_id())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for BankAccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BankAccountId {
    fn default() -> Self {
        Self::new()
    }
}

/// 客户 ID（客户由其他服务维护，这里只保存外键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
pub struct CustomerId(pub i64);

/// 所属客户引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
}

impl CustomerRef {
    pub fn new(id: impl Into<CustomerId>) -> Self {
        Self { id: id.into() }
    }
}
