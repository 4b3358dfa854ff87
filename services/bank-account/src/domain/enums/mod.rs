//! 领域枚举

mod account_status;

pub use account_status::*;
