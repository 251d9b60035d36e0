//! Shared types for Tally.
//!
//! This crate provides the foundation types used across all other crates:
//! - The `MonetaryValue` fixed-point money type and its error taxonomy
//! - The `Currency` code enum with per-currency display scales
//! - Typed IDs for type-safe entity references

pub mod types;

pub use types::{Currency, MoneyError, MonetaryValue};
