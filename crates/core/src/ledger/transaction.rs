//! Draft/committed transactions built from debit and credit lines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::id::AccountId;
use tally_shared::types::money::decimal_from_f64;

use super::error::LedgerError;
use super::types::{AmountInput, Side, TransactionTotals};

/// Maximum absolute debit/credit difference still considered balanced.
///
/// Covers rounding drift from raw-number entry lines; exact equality is a
/// separate, stricter question answered by comparing monetary values.
const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Still accepting entries; nothing has been applied to any account.
    Draft,
    /// Applied to its accounts; permanently immutable.
    Committed,
}

/// One debit or credit line against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLine {
    /// The account this line targets.
    pub account_id: AccountId,
    /// The amount, in whichever representation family the caller used.
    pub amount: AmountInput,
    /// Which side of the ledger the line lands on.
    pub side: Side,
}

/// A read-only snapshot of a transaction.
#[derive(Debug, Clone)]
pub struct TransactionDetails {
    /// Free-form description.
    pub description: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Lifecycle state.
    pub status: TransactionStatus,
    /// Entry lines in insertion order.
    pub lines: Vec<EntryLine>,
}

/// An ordered collection of entry lines moving from draft to committed.
///
/// A transaction never touches accounts by itself; committing goes through
/// [`super::Book::commit`], which owns the accounts and applies all lines
/// atomically.
#[derive(Debug, Clone)]
pub struct Transaction {
    description: String,
    date: NaiveDate,
    lines: Vec<EntryLine>,
    status: TransactionStatus,
}

impl Transaction {
    /// Creates an empty draft transaction.
    pub fn new(description: impl Into<String>, date: NaiveDate) -> Result<Self, LedgerError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        Ok(Self {
            description,
            date,
            lines: Vec::new(),
            status: TransactionStatus::Draft,
        })
    }

    /// Appends a debit or credit line.
    ///
    /// Rejected after commit, for negative amounts, and for raw amounts
    /// with no exact decimal reading (NaN, infinities, magnitudes past the
    /// representable range). Account existence and currency fit are checked
    /// at commit time, when the book is available.
    pub fn add_entry(
        &mut self,
        account_id: AccountId,
        amount: impl Into<AmountInput>,
        side: Side,
    ) -> Result<(), LedgerError> {
        if self.status == TransactionStatus::Committed {
            return Err(LedgerError::EntryAfterCommit);
        }
        let amount = amount.into();
        // Every stored raw line must read back as an exact decimal, or
        // totals() would misreport it.
        if let AmountInput::Raw(value) = amount {
            decimal_from_f64(value)?;
        }
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        self.lines.push(EntryLine {
            account_id,
            amount,
            side,
        });
        Ok(())
    }

    /// The description given at construction.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The posting date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// True once the transaction has been applied to its accounts.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status == TransactionStatus::Committed
    }

    /// Sums the display-precision amounts on each side.
    #[must_use]
    pub fn totals(&self) -> TransactionTotals {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for line in &self.lines {
            let amount = line.amount.display_decimal();
            match line.side {
                Side::Debit => debit += amount,
                Side::Credit => credit += amount,
            }
        }
        TransactionTotals::new(debit, credit)
    }

    /// True when debits and credits agree within the balance tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.totals().is_balanced_within(BALANCE_TOLERANCE)
    }

    /// True when at least one debit and one credit line are present.
    #[must_use]
    pub fn has_both_sides(&self) -> bool {
        self.lines.iter().any(|line| line.side == Side::Debit)
            && self.lines.iter().any(|line| line.side == Side::Credit)
    }

    /// Entry lines in insertion order, cloned so callers cannot mutate the
    /// transaction through the result.
    #[must_use]
    pub fn entries(&self) -> Vec<EntryLine> {
        self.lines.clone()
    }

    /// A full read-only snapshot.
    #[must_use]
    pub fn details(&self) -> TransactionDetails {
        TransactionDetails {
            description: self.description.clone(),
            date: self.date,
            status: self.status,
            lines: self.lines.clone(),
        }
    }

    pub(crate) fn lines(&self) -> &[EntryLine] {
        &self.lines
    }

    pub(crate) fn mark_committed(&mut self) {
        self.status = TransactionStatus::Committed;
    }

    /// Converts to the serialization contract consumed by persistence
    /// adapters.
    #[must_use]
    pub fn to_data(&self) -> TransactionData {
        TransactionData {
            description: self.description.clone(),
            date: self.date,
            committed: self.is_committed(),
            lines: self.lines.clone(),
        }
    }

    /// Reconstructs a transaction from serialized data, re-validating every
    /// line the way [`Transaction::add_entry`] would.
    pub fn from_data(data: TransactionData) -> Result<Self, LedgerError> {
        let mut tx = Self::new(data.description, data.date)?;
        for line in data.lines {
            tx.add_entry(line.account_id, line.amount, line.side)?;
        }
        if data.committed {
            tx.mark_committed();
        }
        Ok(tx)
    }
}

/// Serialized form of a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// Free-form description.
    pub description: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Whether the transaction has been applied.
    pub committed: bool,
    /// Entry lines in insertion order.
    pub lines: Vec<EntryLine>,
}
