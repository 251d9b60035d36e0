//! Aggregation and distribution over collections of monetary values.
//!
//! All functions require currency-homogeneous input; the first value sets
//! the expected currency and any straggler is reported, never coerced.

use rust_decimal::Decimal;
use thiserror::Error;
use tally_shared::types::{Currency, MoneyError, MonetaryValue};

/// Errors from collection-level monetary operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// A collection mixed two currencies.
    #[error("mixed currencies in collection: expected {expected}, found {found}")]
    MixedCurrencyCollection {
        /// Currency of the first element.
        expected: Currency,
        /// The first non-matching currency encountered.
        found: Currency,
    },

    /// An aggregate that needs at least one element got none.
    #[error("collection is empty")]
    EmptyCollection,

    /// `distribute` was asked for zero shares.
    #[error("share count must be at least 1")]
    InvalidShareCount,

    /// An underlying monetary operation failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl DistributionError {
    /// Stable machine-readable code for API layers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MixedCurrencyCollection { .. } => "MIXED_CURRENCY_COLLECTION",
            Self::EmptyCollection => "EMPTY_COLLECTION",
            Self::InvalidShareCount => "INVALID_SHARE_COUNT",
            Self::Money(MoneyError::CurrencyMismatch { .. }) => "CURRENCY_MISMATCH",
            Self::Money(MoneyError::AmountOutOfRange { .. }) => "AMOUNT_OUT_OF_RANGE",
            Self::Money(MoneyError::DivisionByZero) => "DIVISION_BY_ZERO",
            Self::Money(MoneyError::InvalidNumeral(_)) => "INVALID_NUMERAL",
        }
    }
}

fn ensure_homogeneous(values: &[MonetaryValue]) -> Result<(), DistributionError> {
    let Some(first) = values.first() else {
        return Ok(());
    };
    for value in &values[1..] {
        if value.currency() != first.currency() {
            return Err(DistributionError::MixedCurrencyCollection {
                expected: first.currency(),
                found: value.currency(),
            });
        }
    }
    Ok(())
}

/// Sums a homogeneous collection. An empty collection sums to zero in
/// `zero_currency`, since there is no element to take a currency from.
pub fn sum(
    values: &[MonetaryValue],
    zero_currency: Currency,
) -> Result<MonetaryValue, DistributionError> {
    ensure_homogeneous(values)?;
    let Some((first, rest)) = values.split_first() else {
        return Ok(MonetaryValue::zero(zero_currency));
    };
    let mut total = *first;
    for value in rest {
        total = total.add(value)?;
    }
    Ok(total)
}

/// Arithmetic mean of a non-empty homogeneous collection.
pub fn average(values: &[MonetaryValue]) -> Result<MonetaryValue, DistributionError> {
    if values.is_empty() {
        return Err(DistributionError::EmptyCollection);
    }
    let total = sum(values, values[0].currency())?;
    let count = Decimal::from(values.len());
    Ok(total.divide(count)?)
}

/// Smallest value in a non-empty homogeneous collection.
pub fn min(values: &[MonetaryValue]) -> Result<MonetaryValue, DistributionError> {
    fold_extremum(values, std::cmp::Ordering::Less)
}

/// Largest value in a non-empty homogeneous collection.
pub fn max(values: &[MonetaryValue]) -> Result<MonetaryValue, DistributionError> {
    fold_extremum(values, std::cmp::Ordering::Greater)
}

fn fold_extremum(
    values: &[MonetaryValue],
    keep: std::cmp::Ordering,
) -> Result<MonetaryValue, DistributionError> {
    let Some((first, rest)) = values.split_first() else {
        return Err(DistributionError::EmptyCollection);
    };
    let mut best = *first;
    for value in rest {
        if value.compare(&best)? == keep {
            best = *value;
        }
    }
    Ok(best)
}

/// Splits an amount into `shares` parts that sum back exactly.
///
/// Works in whole display units (cents for two-decimal currencies): every
/// share gets the even split rounded down, and the leftover units go one
/// each to the earliest shares. `distribute(100 USD, 3)` is
/// `[33.34, 33.33, 33.33]`.
pub fn distribute(
    amount: &MonetaryValue,
    shares: usize,
) -> Result<Vec<MonetaryValue>, DistributionError> {
    if shares == 0 {
        return Err(DistributionError::InvalidShareCount);
    }
    let scale = amount.display_scale();
    let mut display = amount.to_display();
    display.rescale(scale);
    let total_units = display.mantissa();

    let share_count = shares as i128;
    let sign = total_units.signum();
    let magnitude = total_units.abs();
    let base = magnitude / share_count;
    let remainder = (magnitude % share_count) as usize;

    let mut parts = Vec::with_capacity(shares);
    for index in 0..shares {
        let units = if index < remainder { base + 1 } else { base };
        let share = Decimal::from_i128_with_scale(sign * units, scale);
        parts.push(MonetaryValue::new(share, amount.currency())?);
    }
    Ok(parts)
}

/// The given percentage of an amount, e.g. `percentage(x, 15)` is 15% of x.
pub fn percentage(
    amount: &MonetaryValue,
    percent: Decimal,
) -> Result<MonetaryValue, DistributionError> {
    Ok(amount.multiply(percent / Decimal::ONE_HUNDRED)?)
}

/// The tax owed on an amount at the given percentage rate.
pub fn tax(amount: &MonetaryValue, rate: Decimal) -> Result<MonetaryValue, DistributionError> {
    percentage(amount, rate)
}

/// The amount remaining after a percentage discount.
pub fn discount(
    amount: &MonetaryValue,
    percent: Decimal,
) -> Result<MonetaryValue, DistributionError> {
    let off = percentage(amount, percent)?;
    Ok(amount.subtract(&off)?)
}
