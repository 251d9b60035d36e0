//! Ledger accounts: named balance holders with a fixed polarity.

use serde::{Deserialize, Serialize};
use tally_shared::types::money::MoneyData;
use tally_shared::types::{Currency, MoneyError, MonetaryValue};

use super::error::LedgerError;
use super::types::{AmountInput, Polarity, Representation, Side};

/// A balance returned in the representation family the account was
/// constructed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceAmount {
    /// Display-precision primitive, for accounts constructed from raw numbers.
    Raw(f64),
    /// The underlying monetary value.
    Money(MonetaryValue),
}

/// A named balance holder with a fixed debit/credit polarity.
///
/// The balance is always stored as a canonical [`MonetaryValue`] no matter
/// how the account was constructed; [`Account::balance`] is the view that
/// preserves the caller's representation family. The balance value itself is
/// immutable: debit and credit replace it with a freshly computed one.
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    polarity: Polarity,
    currency: Currency,
    balance: MonetaryValue,
    representation: Representation,
}

impl Account {
    /// Creates an account with an explicit polarity.
    ///
    /// A raw opening balance is wrapped in `default_currency` and records the
    /// raw-number representation; a monetary opening balance fixes the
    /// account currency to its own. Blank names and negative opening
    /// balances are rejected.
    pub fn new(
        name: impl Into<String>,
        polarity: Polarity,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let (balance, representation, currency) = match opening.into() {
            AmountInput::Raw(value) => {
                let money = MonetaryValue::from_f64(value, default_currency)?;
                (money, Representation::RawNumber, default_currency)
            }
            AmountInput::Money(money) => (money, Representation::Monetary, money.currency()),
        };

        if balance.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }

        Ok(Self {
            name,
            polarity,
            currency,
            balance,
            representation,
        })
    }

    /// Creates a debit-positive asset account.
    pub fn asset(
        name: impl Into<String>,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        Self::new(name, Polarity::DebitPositive, opening, default_currency)
    }

    /// Creates a debit-positive expense account.
    pub fn expense(
        name: impl Into<String>,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        Self::new(name, Polarity::DebitPositive, opening, default_currency)
    }

    /// Creates a credit-positive liability account.
    pub fn liability(
        name: impl Into<String>,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        Self::new(name, Polarity::CreditPositive, opening, default_currency)
    }

    /// Creates a credit-positive equity account.
    pub fn equity(
        name: impl Into<String>,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        Self::new(name, Polarity::CreditPositive, opening, default_currency)
    }

    /// Creates a credit-positive income account.
    pub fn income(
        name: impl Into<String>,
        opening: impl Into<AmountInput>,
        default_currency: Currency,
    ) -> Result<Self, LedgerError> {
        Self::new(name, Polarity::CreditPositive, opening, default_currency)
    }

    /// The account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The polarity pinned at construction.
    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The currency every amount is normalized into.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// The representation family recorded at construction.
    #[must_use]
    pub const fn representation(&self) -> Representation {
        self.representation
    }

    /// The balance in the representation family the account was constructed
    /// with, regardless of how individual debit/credit calls were invoked.
    #[must_use]
    pub fn balance(&self) -> BalanceAmount {
        match self.representation {
            Representation::RawNumber => BalanceAmount::Raw(self.balance.to_display_f64()),
            Representation::Monetary => BalanceAmount::Money(self.balance),
        }
    }

    /// The canonical monetary balance.
    #[must_use]
    pub const fn balance_money(&self) -> &MonetaryValue {
        &self.balance
    }

    /// Applies a debit: adds for debit-positive accounts, subtracts for
    /// credit-positive ones.
    pub fn debit(&mut self, amount: impl Into<AmountInput>) -> Result<(), LedgerError> {
        let next = self.preview(&self.balance, Side::Debit, &amount.into())?;
        self.balance = next;
        Ok(())
    }

    /// Applies a credit: subtracts for debit-positive accounts, adds for
    /// credit-positive ones.
    pub fn credit(&mut self, amount: impl Into<AmountInput>) -> Result<(), LedgerError> {
        let next = self.preview(&self.balance, Side::Credit, &amount.into())?;
        self.balance = next;
        Ok(())
    }

    /// Computes the successor balance for one line without mutating anything.
    ///
    /// Used directly by debit/credit and by the book's staging pass, so a
    /// commit can validate every line before touching any account.
    pub(crate) fn preview(
        &self,
        balance: &MonetaryValue,
        side: Side,
        amount: &AmountInput,
    ) -> Result<MonetaryValue, LedgerError> {
        let amount = self.normalize(amount)?;
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(self.polarity.apply(balance, side, &amount)?)
    }

    pub(crate) fn set_balance(&mut self, balance: MonetaryValue) {
        self.balance = balance;
    }

    /// Normalizes a caller-supplied amount into this account's currency.
    ///
    /// Raw numbers are coerced; monetary values must already match exactly.
    fn normalize(&self, amount: &AmountInput) -> Result<MonetaryValue, LedgerError> {
        match amount {
            AmountInput::Raw(value) => Ok(MonetaryValue::from_f64(*value, self.currency)?),
            AmountInput::Money(money) => {
                if money.currency() == self.currency {
                    Ok(*money)
                } else {
                    Err(LedgerError::Money(MoneyError::CurrencyMismatch {
                        expected: self.currency,
                        actual: money.currency(),
                    }))
                }
            }
        }
    }

    /// Converts to the serialization contract consumed by persistence
    /// adapters.
    #[must_use]
    pub fn to_data(&self) -> AccountData {
        AccountData {
            name: self.name.clone(),
            balance: MoneyData::from(self.balance),
            polarity: self.polarity,
            representation: self.representation,
            currency: self.currency,
        }
    }

    /// Reconstructs an account from serialized data, preserving the
    /// representation family and re-validating construction invariants.
    pub fn from_data(data: AccountData) -> Result<Self, LedgerError> {
        if data.name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let balance = MonetaryValue::try_from(data.balance)?;
        if balance.currency() != data.currency {
            return Err(LedgerError::Money(MoneyError::CurrencyMismatch {
                expected: data.currency,
                actual: balance.currency(),
            }));
        }
        if balance.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(Self {
            name: data.name,
            polarity: data.polarity,
            currency: data.currency,
            balance,
            representation: data.representation,
        })
    }
}

/// Serialized form of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    /// Account name.
    pub name: String,
    /// Balance as `{ amount, currency }`.
    pub balance: MoneyData,
    /// Debit/credit polarity.
    pub polarity: Polarity,
    /// Representation family recorded at construction.
    pub representation: Representation,
    /// Account currency.
    pub currency: Currency,
}
