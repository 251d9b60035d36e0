//! Common types used across the application.

pub mod currency;
pub mod id;
pub mod money;

#[cfg(test)]
mod money_props;

pub use currency::Currency;
pub use id::*;
pub use money::{MoneyError, MonetaryValue};
