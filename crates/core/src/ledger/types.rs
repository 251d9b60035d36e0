//! Ledger domain types shared across accounts, transactions, and the book.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::money::decimal_from_f64;
use tally_shared::types::MonetaryValue;

use super::error::LedgerError;

/// The debit or credit designation of a transaction line.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/income accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/income accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(LedgerError::InvalidSide(s.to_string())),
        }
    }
}

/// Whether debits increase or decrease an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Debit-positive accounts (asset, expense): debits add, credits subtract.
    DebitPositive,
    /// Credit-positive accounts (liability, equity, income): credits add.
    CreditPositive,
}

impl Polarity {
    /// Computes the successor balance for one applied amount.
    pub(crate) fn apply(
        self,
        balance: &MonetaryValue,
        side: Side,
        amount: &MonetaryValue,
    ) -> Result<MonetaryValue, tally_shared::types::MoneyError> {
        match (self, side) {
            (Self::DebitPositive, Side::Debit) | (Self::CreditPositive, Side::Credit) => {
                balance.add(amount)
            }
            (Self::DebitPositive, Side::Credit) | (Self::CreditPositive, Side::Debit) => {
                balance.subtract(amount)
            }
        }
    }
}

/// High-level account kind determining the normal balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Asset account (debit-positive).
    Asset,
    /// Liability account (credit-positive).
    Liability,
    /// Equity account (credit-positive).
    Equity,
    /// Income account (credit-positive).
    Income,
    /// Expense account (debit-positive).
    Expense,
}

impl AccountKind {
    /// The polarity pinned for accounts of this kind.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Asset | Self::Expense => Polarity::DebitPositive,
            Self::Liability | Self::Equity | Self::Income => Polarity::CreditPositive,
        }
    }
}

/// Which representation family a caller used to construct an account.
///
/// Recorded at construction and preserved through serialization, so
/// `Account::balance` keeps returning the family the caller started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Balance was supplied as a primitive number.
    RawNumber,
    /// Balance was supplied as a monetary value.
    Monetary,
}

/// An amount supplied by a caller: a legacy primitive number or a
/// full monetary value.
///
/// Serializes untagged, so raw amounts stay plain numbers and monetary
/// amounts stay `{ amount, currency }` objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A monetary value carrying its own currency.
    Money(MonetaryValue),
    /// A primitive number, coerced into the target currency on use.
    Raw(f64),
}

impl AmountInput {
    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Raw(value) => *value < 0.0,
            Self::Money(money) => money.is_negative(),
        }
    }

    /// Coerces to a display-precision decimal for balance totals.
    ///
    /// Monetary values round to their display scale; raw numbers are read
    /// through their shortest decimal rendering. Raw amounts with no exact
    /// decimal reading never get stored in a line, so the fallback is
    /// unreachable.
    #[must_use]
    pub fn display_decimal(&self) -> Decimal {
        match self {
            Self::Raw(value) => decimal_from_f64(*value).unwrap_or_default(),
            Self::Money(money) => money.to_display(),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Raw(value)
    }
}

impl From<MonetaryValue> for AmountInput {
    fn from(value: MonetaryValue) -> Self {
        Self::Money(value)
    }
}

/// Transaction totals for validation and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTotals {
    /// Total debit amount at display precision.
    pub debit: Decimal,
    /// Total credit amount at display precision.
    pub credit: Decimal,
}

impl TransactionTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the totals agree within the given tolerance.
    ///
    /// This is deliberately looser than `MonetaryValue` equality: it absorbs
    /// residual imprecision from lines supplied as raw numbers.
    #[must_use]
    pub fn is_balanced_within(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use tally_shared::types::Currency;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!(Side::from_str("debit").unwrap(), Side::Debit);
        assert_eq!(Side::from_str("CREDIT").unwrap(), Side::Credit);
        assert!(matches!(
            Side::from_str("both"),
            Err(LedgerError::InvalidSide(_))
        ));
    }

    #[test]
    fn kind_pins_polarity() {
        assert_eq!(AccountKind::Asset.polarity(), Polarity::DebitPositive);
        assert_eq!(AccountKind::Expense.polarity(), Polarity::DebitPositive);
        assert_eq!(AccountKind::Liability.polarity(), Polarity::CreditPositive);
        assert_eq!(AccountKind::Equity.polarity(), Polarity::CreditPositive);
        assert_eq!(AccountKind::Income.polarity(), Polarity::CreditPositive);
    }

    #[test]
    fn polarity_reverses_the_effect() {
        let balance = MonetaryValue::new(dec!(100), Currency::Usd).unwrap();
        let amount = MonetaryValue::new(dec!(40), Currency::Usd).unwrap();

        let up = Polarity::DebitPositive
            .apply(&balance, Side::Debit, &amount)
            .unwrap();
        assert_eq!(up.to_display(), dec!(140.00));

        let down = Polarity::CreditPositive
            .apply(&balance, Side::Debit, &amount)
            .unwrap();
        assert_eq!(down.to_display(), dec!(60.00));
    }

    #[test]
    fn amount_input_sign_checks() {
        assert!(AmountInput::from(-1.0).is_negative());
        assert!(!AmountInput::from(0.0).is_negative());

        let money = MonetaryValue::new(dec!(-5), Currency::Usd).unwrap();
        assert!(AmountInput::from(money).is_negative());
    }

    #[test]
    fn amount_input_serializes_untagged() {
        let raw = AmountInput::from(12.5);
        assert_eq!(serde_json::to_value(raw).unwrap(), serde_json::json!(12.5));

        let money = AmountInput::from(MonetaryValue::new(dec!(12.5), Currency::Usd).unwrap());
        let json = serde_json::to_value(money).unwrap();
        assert_eq!(json["currency"], "USD");
    }

    #[test]
    fn totals_tolerance_is_distinct_from_exact_equality() {
        let totals = TransactionTotals::new(dec!(100.004), dec!(100.00));
        assert!(totals.is_balanced_within(dec!(0.005)));
        assert_ne!(totals.difference(), Decimal::ZERO);

        let off = TransactionTotals::new(dec!(100.01), dec!(100.00));
        assert!(!off.is_balanced_within(dec!(0.005)));
    }
}
