//! Core double-entry ledger logic for Tally.
//!
//! This crate contains pure business logic with ZERO storage or web
//! dependencies. All domain types, validation rules, and calculations live
//! here; persistence adapters consume the `*Data` serialization contract.
//!
//! # Modules
//!
//! - `ledger` - Accounts, transactions, and the commit engine
//! - `currency` - Distribution utilities and free-text amount parsing

pub mod currency;
pub mod ledger;
