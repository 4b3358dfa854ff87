//! 银行账户实体

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use cuba_domain_core::Entity;

use crate::domain::enums::AccountStatus;
use crate::domain::value_objects::{BankAccountId, CustomerRef};

/// 银行账户
///
/// 除 `id` 外的字段都可以为空。`id` 由仓储在首次保存时分配，之后不再变化。
///
/// 相等性只看标识：两个账户的 `id` 都存在且相同才相等，没有 `id` 的账户不等于
/// 任何账户。哈希值在类型级别固定，因此账户字段变化（包括保存后获得 `id`）
/// 不会改变它在哈希集合中的位置。
#[derive(Debug, Clone, Default)]
pub struct BankAccount {
    id: Option<BankAccountId>,
    /// 开户日期
    created: Option<NaiveDate>,
    /// 余额
    balance: Option<f64>,
    status: Option<AccountStatus>,
    /// 所属客户，不级联
    customer: Option<CustomerRef>,
}

impl BankAccount {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<&BankAccountId> {
        self.id.as_ref()
    }

    pub fn created(&self) -> Option<NaiveDate> {
        self.created
    }

    pub fn balance(&self) -> Option<f64> {
        self.balance
    }

    pub fn status(&self) -> Option<AccountStatus> {
        self.status
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    // ========== Builders ==========

    pub fn with_id(mut self, id: BankAccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created(mut self, created: NaiveDate) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_customer(mut self, customer: CustomerRef) -> Self {
        self.customer = Some(customer);
        self
    }

    // ========== Setters ==========

    pub fn set_id(&mut self, id: Option<BankAccountId>) {
        self.id = id;
    }

    pub fn set_created(&mut self, created: Option<NaiveDate>) {
        self.created = created;
    }

    pub fn set_balance(&mut self, balance: Option<f64>) {
        self.balance = balance;
    }

    pub fn set_status(&mut self, status: Option<AccountStatus>) {
        self.status = status;
    }

    pub fn set_customer(&mut self, customer: Option<CustomerRef>) {
        self.customer = customer;
    }

    /// 合并部分更新
    ///
    /// `patch` 中非空的 `created`、`balance`、`status` 覆盖当前值，空值保留当前值。
    /// `id` 与 `customer` 不参与合并。
    pub fn merge_from(&mut self, patch: &BankAccount) {
        if let Some(created) = patch.created {
            self.created = Some(created);
        }
        if let Some(balance) = patch.balance {
            self.balance = Some(balance);
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
    }
}

impl Entity for BankAccount {
    type Id = BankAccountId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

impl PartialEq for BankAccount {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Hash for BankAccount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::any::type_name::<Self>().hash(state);
    }
}

fn write_nullable<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{}", value),
        None => f.write_str("null"),
    }
}

/// 浮点数文本形式：`[1e-3, 1e7)` 内用定点（至少一位小数），其余用 `1.0E20` 形式
fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BankAccount{id=")?;
        write_nullable(f, self.id)?;
        f.write_str(", created='")?;
        write_nullable(f, self.created)?;
        f.write_str("', balance=")?;
        match self.balance {
            Some(balance) => f.write_str(&format_double(balance))?,
            None => f.write_str("null")?,
        }
        f.write_str(", status='")?;
        write_nullable(f, self.status)?;
        f.write_str("'}")
    }
}

/// 可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankAccountSortField {
    Id,
    Created,
    Balance,
    Status,
}

impl BankAccountSortField {
    pub const ALL: [BankAccountSortField; 4] = [
        BankAccountSortField::Id,
        BankAccountSortField::Created,
        BankAccountSortField::Balance,
        BankAccountSortField::Status,
    ];

    /// 对外属性名
    pub fn property(&self) -> &'static str {
        match self {
            BankAccountSortField::Id => "id",
            BankAccountSortField::Created => "created",
            BankAccountSortField::Balance => "balance",
            BankAccountSortField::Status => "status",
        }
    }

    /// 按该字段比较两个账户，空值排在前面
    pub fn compare(&self, a: &BankAccount, b: &BankAccount) -> Ordering {
        match self {
            BankAccountSortField::Id => a.id.cmp(&b.id),
            BankAccountSortField::Created => a.created.cmp(&b.created),
            BankAccountSortField::Balance => match (a.balance, b.balance) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            BankAccountSortField::Status => {
                a.status.map(|s| s.as_str()).cmp(&b.status.map(|s| s.as_str()))
            }
        }
    }
}

impl FromStr for BankAccountSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BankAccountSortField::ALL
            .into_iter()
            .find(|field| field.property() == s)
            .ok_or_else(|| format!("Unknown sort property: {}", s))
    }
}
