//! bank-account 服务库
//!
//! 银行账户的增删改查与部分更新（merge patch）

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
