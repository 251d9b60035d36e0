//! Property tests for account and book behavior.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_shared::types::id::AccountId;
use tally_shared::types::{Currency, MonetaryValue};

use super::account::Account;
use super::book::Book;
use super::transaction::Transaction;
use super::types::Side;

fn usd(amount: Decimal) -> MonetaryValue {
    MonetaryValue::new(amount, Currency::Usd).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

/// Cent amounts up to one million dollars.
fn cents() -> impl Strategy<Value = Decimal> {
    (0_i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn debit_then_credit_restores_any_balance(opening in cents(), amount in cents()) {
        let mut account = Account::asset("Cash", usd(opening), Currency::Usd).unwrap();
        let before = *account.balance_money();
        account.debit(usd(amount)).unwrap();
        account.credit(usd(amount)).unwrap();
        prop_assert_eq!(*account.balance_money(), before);
    }

    #[test]
    fn balanced_transactions_always_commit_and_conserve_value(
        amounts in prop::collection::vec(cents(), 1..8),
    ) {
        let cash = AccountId::new();
        let sales = AccountId::new();
        let mut book = Book::new();
        book.add_account(cash, Account::asset("Cash", usd(dec!(0)), Currency::Usd).unwrap())
            .unwrap();
        book.add_account(sales, Account::income("Sales", usd(dec!(0)), Currency::Usd).unwrap())
            .unwrap();

        let mut tx = Transaction::new("Mirrored lines", date()).unwrap();
        let mut total = Decimal::ZERO;
        for amount in &amounts {
            tx.add_entry(cash, usd(*amount), Side::Debit).unwrap();
            tx.add_entry(sales, usd(*amount), Side::Credit).unwrap();
            total += amount;
        }
        prop_assert!(tx.is_balanced());
        book.commit(&mut tx).unwrap();

        prop_assert_eq!(book.account(cash).unwrap().balance_money().to_display(), total);
        prop_assert_eq!(book.account(sales).unwrap().balance_money().to_display(), total);
    }

    #[test]
    fn failed_commits_never_mutate_balances(
        debit in cents(),
        offset in 1_i64..=1_000_000,
    ) {
        let cash = AccountId::new();
        let sales = AccountId::new();
        let mut book = Book::new();
        book.add_account(cash, Account::asset("Cash", usd(dec!(7)), Currency::Usd).unwrap())
            .unwrap();
        book.add_account(sales, Account::income("Sales", usd(dec!(7)), Currency::Usd).unwrap())
            .unwrap();

        // The credit differs by at least one cent, so the tolerance never saves it.
        let credit = debit + Decimal::new(offset, 2);
        let mut tx = Transaction::new("Lopsided", date()).unwrap();
        tx.add_entry(cash, usd(debit), Side::Debit).unwrap();
        tx.add_entry(sales, usd(credit), Side::Credit).unwrap();

        prop_assert!(book.commit(&mut tx).is_err());
        prop_assert!(!tx.is_committed());
        prop_assert_eq!(book.account(cash).unwrap().balance_money().to_display(), dec!(7.00));
        prop_assert_eq!(book.account(sales).unwrap().balance_money().to_display(), dec!(7.00));
    }
}
