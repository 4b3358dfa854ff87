//! 实体定义

mod bank_account;

pub use bank_account::*;
