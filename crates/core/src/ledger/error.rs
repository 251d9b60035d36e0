//! Ledger error types for validation and state errors.
//!
//! All errors are raised synchronously and fail-fast: no operation retries
//! internally, and nothing is coerced or auto-corrected to paper over a
//! mismatch.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, MoneyError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Account name cannot be blank.
    #[error("Account name cannot be empty")]
    EmptyName,

    /// Transaction description cannot be blank.
    #[error("Transaction description cannot be empty")]
    EmptyDescription,

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Entry side token was neither debit nor credit.
    #[error("Invalid entry side: {0}")]
    InvalidSide(String),

    // ========== State Errors ==========
    /// Cannot add entries once a transaction is committed.
    #[error("Cannot add entries to a committed transaction")]
    EntryAfterCommit,

    /// Transaction has already been committed.
    #[error("Transaction is already committed")]
    AlreadyCommitted,

    /// Transaction has no lines, or is missing one of the two sides.
    #[error("Transaction must have at least one debit and one credit entry")]
    EmptyTransaction,

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedTransaction {
        /// Total debit amount at display precision.
        debit: Decimal,
        /// Total credit amount at display precision.
        credit: Decimal,
    },

    // ========== Registry Errors ==========
    /// No account registered under the referenced ID.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// An account is already registered under the ID.
    #[error("Account already registered: {0}")]
    DuplicateAccount(AccountId),

    // ========== Money Errors ==========
    /// Monetary value construction or arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl LedgerError {
    /// Returns a stable error code for diagnostics and host mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidSide(_) => "INVALID_SIDE",
            Self::EntryAfterCommit => "ENTRY_AFTER_COMMIT",
            Self::AlreadyCommitted => "ALREADY_COMMITTED",
            Self::EmptyTransaction => "EMPTY_TRANSACTION",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::Money(MoneyError::CurrencyMismatch { .. }) => "CURRENCY_MISMATCH",
            Self::Money(MoneyError::AmountOutOfRange { .. }) => "AMOUNT_OUT_OF_RANGE",
            Self::Money(MoneyError::DivisionByZero) => "DIVISION_BY_ZERO",
            Self::Money(MoneyError::InvalidNumeral(_)) => "INVALID_NUMERAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_shared::types::Currency;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(LedgerError::EmptyName.error_code(), "EMPTY_NAME");
        assert_eq!(
            LedgerError::UnbalancedTransaction {
                debit: dec!(100),
                credit: dec!(90),
            }
            .error_code(),
            "UNBALANCED_TRANSACTION"
        );
        assert_eq!(
            LedgerError::Money(MoneyError::CurrencyMismatch {
                expected: Currency::Usd,
                actual: Currency::Eur,
            })
            .error_code(),
            "CURRENCY_MISMATCH"
        );
    }

    #[test]
    fn unbalanced_display_reports_both_totals() {
        let err = LedgerError::UnbalancedTransaction {
            debit: dec!(100.00),
            credit: dec!(90.00),
        };
        assert_eq!(
            err.to_string(),
            "Transaction is not balanced. Debit: 100.00, Credit: 90.00"
        );
    }
}
