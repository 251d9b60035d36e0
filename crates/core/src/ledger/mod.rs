//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Accounts with a fixed debit/credit polarity
//! - Transactions with a Draft -> Committed lifecycle
//! - The `Book` registry with an all-or-nothing commit engine
//! - Domain types shared across the module
//! - Error types for ledger operations

pub mod account;
pub mod book;
pub mod error;
pub mod transaction;
pub mod types;

#[cfg(test)]
mod book_props;

pub use account::{Account, AccountData, BalanceAmount};
pub use book::Book;
pub use error::LedgerError;
pub use transaction::{
    EntryLine, Transaction, TransactionData, TransactionDetails, TransactionStatus,
};
pub use types::{AccountKind, AmountInput, Polarity, Representation, Side, TransactionTotals};
