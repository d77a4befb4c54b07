use futures::Stream;
use rust_decimal::Decimal;

use crate::domain::{Account, AccountId, Amount, Error, Request, Transaction, TransactionKind};

pub trait TransactionStream {
    type TxStream: Stream<Item = Result<Request, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::TxStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

/// Staged balance of one account, visible only inside [`AccountStore::atomically`].
#[derive(Debug)]
pub struct BalanceCell {
    account_id: AccountId,
    balance: Decimal,
}

impl BalanceCell {
    pub fn new(account_id: AccountId, balance: Decimal) -> Self {
        Self {
            account_id,
            balance,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Check-then-write on the staged balance. Never goes below zero.
    pub fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, Error> {
        let next = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| Error::BalanceOverflow {
                account: self.account_id.clone(),
                balance: self.balance,
                delta,
            })?;

        if delta < Decimal::ZERO && next < Decimal::ZERO {
            return Err(Error::InsufficientFunds {
                account: self.account_id.clone(),
                balance: self.balance,
                requested: -delta,
            });
        }

        self.balance = next;
        Ok(next)
    }
}

pub trait AccountStore: Send + Sync {
    fn create(&self, email: &str) -> Result<Account, Error>;

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    fn get(&self, account_id: &AccountId) -> Result<Account, Error>;

    fn accounts(&self) -> Result<Vec<Account>, Error>;

    /// Runs `unit` while holding the account's exclusive lock. The staged
    /// balance is persisted only when `unit` returns `Ok`.
    fn atomically<T, F>(&self, account_id: &AccountId, unit: F) -> Result<T, Error>
    where
        F: FnOnce(&mut BalanceCell) -> Result<T, Error>;

    fn balance(&self, account_id: &AccountId) -> Result<Decimal, Error> {
        Ok(self.get(account_id)?.balance)
    }

    fn apply_delta(&self, account_id: &AccountId, delta: Decimal) -> Result<Decimal, Error> {
        self.atomically(account_id, |cell| cell.apply_delta(delta))
    }
}

pub trait TransactionLog: Send + Sync {
    fn append(
        &self,
        account_id: &AccountId,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, Error>;

    /// Newest first, at most `limit` entries.
    fn list_recent(&self, account_id: &AccountId, limit: usize) -> Result<Vec<Transaction>, Error>;

    fn count(&self, account_id: &AccountId) -> Result<usize, Error>;
}
