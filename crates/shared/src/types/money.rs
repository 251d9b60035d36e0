//! Fixed-point monetary value with an explicit internal scale.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! `MonetaryValue` keeps its amount as a `rust_decimal::Decimal` pinned to an
//! internal scale, so the mantissa is always the exact integer
//! `amount * 10^scale`. Arithmetic between values of different currencies is
//! rejected, never converted.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::currency::Currency;

/// Minimum internal scale carried by every value, so intermediate arithmetic
/// never loses sub-display precision.
pub const MIN_INTERNAL_SCALE: u32 = 6;

/// Maximum internal scale representable by the underlying decimal.
pub const MAX_INTERNAL_SCALE: u32 = 28;

/// Largest mantissa the underlying 96-bit decimal can hold exactly.
const MAX_MANTISSA: i128 = 79_228_162_514_264_337_593_543_950_335;

/// Errors raised by monetary value construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Binary operation between two different currencies.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        expected: Currency,
        /// Currency of the offending operand.
        actual: Currency,
    },

    /// Amount cannot be represented exactly at the requested scale.
    #[error("Amount {amount} exceeds the safe magnitude {max} at scale {scale}")]
    AmountOutOfRange {
        /// The amount that was rejected.
        amount: Decimal,
        /// The largest representable magnitude at the scale.
        max: Decimal,
        /// The internal scale the amount was being held at.
        scale: u32,
    },

    /// Division by a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Input was not a plain decimal numeral.
    #[error("Not a numeric amount: {0}")]
    InvalidNumeral(String),
}

/// An immutable fixed-point amount tagged with a currency.
///
/// Every arithmetic result is a fresh value; nothing is mutated in place.
/// `add`/`subtract` widen to the larger of the two internal scales;
/// `multiply`/`divide` round back to the operand's own scale so repeated
/// operations never inflate precision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "MoneyData", into = "MoneyData")]
pub struct MonetaryValue {
    amount: Decimal,
    scale: u32,
    currency: Currency,
}

/// Serialized form of a monetary value: `{ amount, currency }`.
///
/// The amount serializes as a decimal string with its scale intact, so a
/// round-trip reconstructs the same internal scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyData {
    /// The amount, scale-preserving.
    pub amount: Decimal,
    /// The currency code.
    pub currency: Currency,
}

impl MonetaryValue {
    /// Creates a value whose internal scale is derived from the input:
    /// the maximum of the input's decimal digits, the currency display
    /// scale, and [`MIN_INTERNAL_SCALE`].
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        Self::with_scale(amount, currency, 0)
    }

    /// Creates a value with an explicit internal-scale floor.
    ///
    /// The effective scale is still at least the derived scale of
    /// [`Self::new`]; the floor can only raise it.
    pub fn with_scale(
        amount: Decimal,
        currency: Currency,
        min_scale: u32,
    ) -> Result<Self, MoneyError> {
        let scale = amount
            .scale()
            .max(currency.minor_units())
            .max(MIN_INTERNAL_SCALE)
            .max(min_scale)
            .min(MAX_INTERNAL_SCALE);
        let amount = rescale_checked(amount, scale)?;
        Ok(Self {
            amount,
            scale,
            currency,
        })
    }

    /// Creates a zero value in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: rescale_lossless(Decimal::ZERO, MIN_INTERNAL_SCALE),
            scale: MIN_INTERNAL_SCALE,
            currency,
        }
    }

    /// Creates a value from a primitive float.
    ///
    /// The float is read through its shortest decimal rendering, i.e. the
    /// digits a caller would have written, not the binary expansion.
    /// Non-finite input fails with `InvalidNumeral`; magnitudes past the
    /// safe-magnitude cap fail with `AmountOutOfRange`.
    pub fn from_f64(value: f64, currency: Currency) -> Result<Self, MoneyError> {
        let amount = decimal_from_f64(value)?;
        Self::new(amount, currency)
    }

    /// Creates a value from a numeral string such as `"12.34"`.
    pub fn from_numeral(text: &str, currency: Currency) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let amount = Decimal::from_str_exact(trimmed)
            .map_err(|_| MoneyError::InvalidNumeral(trimmed.to_string()))?;
        Self::new(amount, currency)
    }

    /// The currency this value is denominated in.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// The internal scale (fractional digits) this value is held at.
    #[must_use]
    pub const fn internal_scale(&self) -> u32 {
        self.scale
    }

    /// The currency's display scale.
    #[must_use]
    pub const fn display_scale(&self) -> u32 {
        self.currency.minor_units()
    }

    /// The exact integer `amount * 10^internal_scale`.
    #[must_use]
    pub fn raw_integer(&self) -> i128 {
        self.amount.mantissa()
    }

    /// The full, unrounded internal amount.
    #[must_use]
    pub const fn to_internal(&self) -> Decimal {
        self.amount
    }

    /// The amount rounded half-up to the currency's display scale.
    #[must_use]
    pub fn to_display(&self) -> Decimal {
        self.amount.round_dp_with_strategy(
            self.currency.minor_units(),
            RoundingStrategy::MidpointAwayFromZero,
        )
    }

    /// Primitive adapter for callers wanting a plain number at display scale.
    #[must_use]
    pub fn to_display_f64(&self) -> f64 {
        self.to_display().to_f64().unwrap_or(0.0)
    }

    /// Adds another value of the same currency.
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let scale = self.scale.max(other.scale);
        let lhs = rescale_checked(self.amount, scale)?;
        let rhs = rescale_checked(other.amount, scale)?;
        let amount = lhs
            .checked_add(rhs)
            .ok_or_else(|| result_out_of_range(lhs.mantissa() + rhs.mantissa(), scale))?;
        Ok(Self {
            amount,
            scale,
            currency: self.currency,
        })
    }

    /// Subtracts another value of the same currency.
    pub fn subtract(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let scale = self.scale.max(other.scale);
        let lhs = rescale_checked(self.amount, scale)?;
        let rhs = rescale_checked(other.amount, scale)?;
        let amount = lhs
            .checked_sub(rhs)
            .ok_or_else(|| result_out_of_range(lhs.mantissa() - rhs.mantissa(), scale))?;
        Ok(Self {
            amount,
            scale,
            currency: self.currency,
        })
    }

    /// Multiplies by a dimensionless factor, rounding half-up back to this
    /// value's internal scale.
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| out_of_range(self.amount, self.scale))?;
        self.rebuild(product)
    }

    /// Divides by a dimensionless divisor, rounding half-up back to this
    /// value's internal scale.
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or_else(|| out_of_range(self.amount, self.scale))?;
        self.rebuild(quotient)
    }

    /// Returns this value with the sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            amount: -self.amount,
            scale: self.scale,
            currency: self.currency,
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            scale: self.scale,
            currency: self.currency,
        }
    }

    /// Compares two values of the same currency.
    pub fn compare(&self, other: &Self) -> Result<Ordering, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Returns true if `self > other`; fails across currencies.
    pub fn is_greater_than(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// Returns true if `self < other`; fails across currencies.
    pub fn is_less_than(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Returns true if `self >= other`; fails across currencies.
    pub fn is_greater_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    /// Returns true if `self <= other`; fails across currencies.
    pub fn is_less_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero() && self.amount.is_sign_positive()
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.amount.is_zero() && self.amount.is_sign_negative()
    }

    /// Rebuilds a full-precision intermediate result at this value's scale.
    fn rebuild(&self, value: Decimal) -> Result<Self, MoneyError> {
        let rounded =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero);
        let amount = rescale_checked(rounded, self.scale)?;
        Ok(Self {
            amount,
            scale: self.scale,
            currency: self.currency,
        })
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                actual: other.currency,
            })
        }
    }
}

/// Exact equality: same currency and same value after rescaling to a common
/// scale. Never tolerance-based.
impl PartialEq for MonetaryValue {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for MonetaryValue {}

impl std::fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_display(), self.currency)
    }
}

impl From<MonetaryValue> for MoneyData {
    fn from(value: MonetaryValue) -> Self {
        Self {
            amount: value.amount,
            currency: value.currency,
        }
    }
}

impl TryFrom<MoneyData> for MonetaryValue {
    type Error = MoneyError;

    fn try_from(data: MoneyData) -> Result<Self, Self::Error> {
        Self::new(data.amount, data.currency)
    }
}

impl FromStr for MonetaryValue {
    type Err = MoneyError;

    /// Parses `"<numeral> <CODE>"`, e.g. `"12.34 USD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let numeral = parts
            .next()
            .ok_or_else(|| MoneyError::InvalidNumeral(s.to_string()))?;
        let code = parts
            .next()
            .ok_or_else(|| MoneyError::InvalidNumeral(s.to_string()))?;
        let currency =
            Currency::from_str(code).map_err(|_| MoneyError::InvalidNumeral(s.to_string()))?;
        Self::from_numeral(numeral, currency)
    }
}

/// Reads a float through its shortest decimal rendering, i.e. the digits a
/// caller would have written rather than the binary expansion of the float.
///
/// Fails with `InvalidNumeral` for NaN, infinities, and values too small to
/// hold at any supported scale, and with `AmountOutOfRange` for magnitudes
/// beyond the decimal entirely.
pub fn decimal_from_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::InvalidNumeral(value.to_string()));
    }
    let text = value.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            let max = safe_magnitude(0);
            if value.abs() >= max.to_f64().unwrap_or(f64::MAX) {
                // The offending value has no decimal form; report it clamped
                // to the representable bound.
                let amount = if value.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                };
                MoneyError::AmountOutOfRange {
                    amount,
                    max,
                    scale: 0,
                }
            } else {
                MoneyError::InvalidNumeral(text)
            }
        })
}

/// Largest exactly-representable magnitude at the given scale.
#[must_use]
pub fn safe_magnitude(scale: u32) -> Decimal {
    let limit = MAX_MANTISSA / 10_i128.pow(scale.min(MAX_INTERNAL_SCALE));
    Decimal::from_i128_with_scale(limit, 0)
}

fn out_of_range(amount: Decimal, scale: u32) -> MoneyError {
    MoneyError::AmountOutOfRange {
        amount,
        max: safe_magnitude(scale),
        scale,
    }
}

/// Error for an exact arithmetic result whose mantissa no longer fits the
/// decimal, reported at whole-unit precision.
fn result_out_of_range(result_mantissa: i128, scale: u32) -> MoneyError {
    let units = (result_mantissa / 10_i128.pow(scale)).clamp(-MAX_MANTISSA, MAX_MANTISSA);
    MoneyError::AmountOutOfRange {
        amount: Decimal::from_i128_with_scale(units, 0),
        max: safe_magnitude(scale),
        scale,
    }
}

/// Rescales to `scale`, failing instead of losing exactness when the
/// mantissa would overflow.
fn rescale_checked(amount: Decimal, scale: u32) -> Result<Decimal, MoneyError> {
    if amount.abs() > safe_magnitude(scale) {
        return Err(out_of_range(amount, scale));
    }
    Ok(rescale_lossless(amount, scale))
}

fn rescale_lossless(amount: Decimal, scale: u32) -> Decimal {
    let mut value = amount;
    value.rescale(scale);
    value
}
