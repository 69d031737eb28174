//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{
    AmountError, MAX_AMOUNT, MONEY_SCALE, check_amount, format_amount, percentage, round_money,
};
