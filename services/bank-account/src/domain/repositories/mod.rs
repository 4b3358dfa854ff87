//! 仓储接口

mod bank_account_repository;

pub use bank_account_repository::*;
