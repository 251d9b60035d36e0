//! Property tests for distribution invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{Currency, MonetaryValue};

use super::distribution::{distribute, sum};

fn usd_cents() -> impl Strategy<Value = MonetaryValue> {
    (-100_000_000_i64..=100_000_000).prop_map(|cents| {
        MonetaryValue::new(Decimal::new(cents, 2), Currency::Usd).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn distributed_shares_always_sum_back_to_the_original(
        amount in usd_cents(),
        shares in 1_usize..=50,
    ) {
        let parts = distribute(&amount, shares).unwrap();
        prop_assert_eq!(parts.len(), shares);
        let total = sum(&parts, Currency::Usd).unwrap();
        prop_assert_eq!(total.to_display(), amount.to_display());
    }

    #[test]
    fn shares_never_differ_by_more_than_one_display_unit(
        amount in usd_cents(),
        shares in 1_usize..=50,
    ) {
        let parts = distribute(&amount, shares).unwrap();
        let unit = Decimal::new(1, 2);
        let smallest = parts.iter().map(MonetaryValue::to_display).min().unwrap();
        let largest = parts.iter().map(MonetaryValue::to_display).max().unwrap();
        prop_assert!(largest - smallest <= unit);
    }

    #[test]
    fn earlier_shares_carry_the_remainder(
        amount in usd_cents(),
        shares in 1_usize..=50,
    ) {
        let parts = distribute(&amount, shares).unwrap();
        let magnitudes: Vec<Decimal> =
            parts.iter().map(|p| p.to_display().abs()).collect();
        for pair in magnitudes.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }
}
