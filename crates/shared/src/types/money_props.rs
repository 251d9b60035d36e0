//! Property-based tests for `MonetaryValue` arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::currency::Currency;
use super::money::MonetaryValue;

/// Strategy for amounts in cents, positive or negative.
fn amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a supported currency.
fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Usd),
        Just(Currency::Eur),
        Just(Currency::Gbp),
        Just(Currency::Jpy),
        Just(Currency::Bhd),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Adding then subtracting the same value restores the original.
    #[test]
    fn add_then_subtract_restores(
        (a, b) in (amount(), amount()),
        currency in currency(),
    ) {
        let a = MonetaryValue::new(a, currency).unwrap();
        let b = MonetaryValue::new(b, currency).unwrap();

        let round_trip = a.add(&b).unwrap().subtract(&b).unwrap();
        prop_assert_eq!(round_trip, a);
    }

    /// Double negation is the identity.
    #[test]
    fn double_negation_is_identity(value in amount(), currency in currency()) {
        let m = MonetaryValue::new(value, currency).unwrap();
        prop_assert_eq!(m.negate().negate(), m);
    }

    /// Addition is commutative within a currency.
    #[test]
    fn addition_commutes(
        (a, b) in (amount(), amount()),
        currency in currency(),
    ) {
        let a = MonetaryValue::new(a, currency).unwrap();
        let b = MonetaryValue::new(b, currency).unwrap();
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    /// Widening the internal scale never changes the value.
    #[test]
    fn rescaling_preserves_value(
        value in amount(),
        currency in currency(),
        floor in 6u32..20,
    ) {
        let narrow = MonetaryValue::new(value, currency).unwrap();
        let wide = MonetaryValue::with_scale(value, currency, floor).unwrap();
        prop_assert_eq!(narrow, wide);
    }

    /// Display rounding stays within half a display unit of the exact value.
    #[test]
    fn display_rounding_error_is_bounded(value in amount(), currency in currency()) {
        let m = MonetaryValue::new(value, currency).unwrap();
        let half_unit = Decimal::new(5, currency.minor_units() + 1);
        let error = (m.to_internal() - m.to_display()).abs();
        prop_assert!(error <= half_unit);
    }
}
