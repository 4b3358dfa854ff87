//! 数据库行映射结构

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// 银行账户数据库行
#[derive(Debug, FromRow)]
pub struct BankAccountRow {
    pub id: Uuid,
    pub created: Option<NaiveDate>,
    pub balance: Option<f64>,
    pub status: Option<String>,
    pub customer_id: Option<i64>,
}
