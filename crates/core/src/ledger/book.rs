//! The book: an account registry plus the atomic commit path.

use std::collections::BTreeMap;

use tally_shared::types::MonetaryValue;
use tally_shared::types::id::AccountId;
use tracing::debug;

use super::account::Account;
use super::error::LedgerError;
use super::transaction::Transaction;

/// A registry of accounts keyed by caller-assigned id.
///
/// All balance changes driven by transactions flow through [`Book::commit`],
/// which validates every line before applying any of them. A failed commit
/// leaves every account and the transaction itself untouched.
#[derive(Debug, Default)]
pub struct Book {
    accounts: BTreeMap<AccountId, Account>,
}

impl Book {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account under an id chosen by the caller.
    pub fn add_account(&mut self, id: AccountId, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }
        self.accounts.insert(id, account);
        Ok(())
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Looks up an account for direct debit/credit outside a transaction.
    #[must_use]
    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True when no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Applies a transaction to its accounts, all lines or none.
    ///
    /// Validation order: lifecycle, emptiness (no lines, or all lines on one
    /// side), balance, then a staging pass over every line. Only after all
    /// lines have produced a successor balance are any accounts updated and
    /// the transaction marked committed.
    pub fn commit(&mut self, tx: &mut Transaction) -> Result<(), LedgerError> {
        if tx.is_committed() {
            return Err(LedgerError::AlreadyCommitted);
        }
        if tx.lines().is_empty() || !tx.has_both_sides() {
            return Err(LedgerError::EmptyTransaction);
        }
        if !tx.is_balanced() {
            let totals = tx.totals();
            return Err(LedgerError::UnbalancedTransaction {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        let mut staged: BTreeMap<AccountId, MonetaryValue> = BTreeMap::new();
        for line in tx.lines() {
            let account = self
                .accounts
                .get(&line.account_id)
                .ok_or(LedgerError::AccountNotFound(line.account_id))?;
            let balance = staged
                .get(&line.account_id)
                .copied()
                .unwrap_or(*account.balance_money());
            let next = account.preview(&balance, line.side, &line.amount)?;
            staged.insert(line.account_id, next);
        }

        for (id, balance) in staged {
            if let Some(account) = self.accounts.get_mut(&id) {
                account.set_balance(balance);
            }
        }
        tx.mark_committed();
        debug!(
            description = tx.description(),
            lines = tx.lines().len(),
            "transaction committed"
        );
        Ok(())
    }
}
