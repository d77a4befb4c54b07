//! Ledger service: the only path that moves money.
//!
//! Each deposit or withdrawal runs inside [`AccountStore::atomically`], so the
//! balance change and its transaction record are committed together or not at
//! all.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::config::LedgerConfig;
use crate::domain::{
    Account, AccountId, AccountStore, Amount, Error, Receipt, TransactionKind, TransactionLog,
    TransactionRecord,
};

#[derive(Debug)]
pub struct LedgerService<S, L>
where
    S: AccountStore,
    L: TransactionLog,
{
    accounts: S,
    log: L,
    config: LedgerConfig,
}

impl<S, L> LedgerService<S, L>
where
    S: AccountStore,
    L: TransactionLog,
{
    pub fn new(accounts: S, log: L, config: LedgerConfig) -> Self {
        Self {
            accounts,
            log,
            config,
        }
    }

    pub fn register(&self, email: &str) -> Result<Account, Error> {
        let account = self.accounts.create(email)?;
        info!(account = %account.id, email = %account.email, "account registered");
        Ok(account)
    }

    /// Resolves an email to the account it was registered with.
    pub fn resolve(&self, email: &str) -> Result<AccountId, Error> {
        self.accounts
            .find_by_email(email)?
            .map(|account| account.id)
            .ok_or_else(|| Error::UnknownEmail(email.trim().to_string()))
    }

    pub fn deposit(&self, account_id: &AccountId, amount: Decimal) -> Result<Receipt, Error> {
        self.apply(account_id, TransactionKind::Deposit, amount)
    }

    pub fn withdraw(&self, account_id: &AccountId, amount: Decimal) -> Result<Receipt, Error> {
        self.apply(account_id, TransactionKind::Withdraw, amount)
    }

    #[instrument(skip(self), fields(account = %account_id), err(level = "warn"))]
    pub fn apply(
        &self,
        account_id: &AccountId,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Receipt, Error> {
        let amount = Amount::with_scale(amount, self.config.scale)?;
        let delta = kind.signed(amount);

        let receipt = self.accounts.atomically(account_id, |cell| {
            let balance = cell.apply_delta(delta)?;

            // Any append failure aborts the unit and the staged balance with it.
            let transaction = self
                .log
                .append(account_id, kind, amount)
                .map_err(|e| match e {
                    Error::Durability(_) => e,
                    other => Error::Durability(other.to_string()),
                })?;

            Ok(Receipt {
                balance,
                transaction: transaction.record(),
            })
        })?;

        info!(
            tx = receipt.transaction.id,
            %kind,
            %amount,
            balance = %receipt.balance,
            "transaction committed"
        );

        Ok(receipt)
    }

    pub fn balance(&self, account_id: &AccountId) -> Result<Decimal, Error> {
        self.accounts.balance(account_id)
    }

    /// Newest-first history, capped at `limit` or the configured page size.
    pub fn history(
        &self,
        account_id: &AccountId,
        limit: Option<usize>,
    ) -> Result<Vec<TransactionRecord>, Error> {
        // Unknown accounts are an error, known accounts without movements are not.
        self.accounts.get(account_id)?;

        let limit = limit.unwrap_or(self.config.history_limit);
        let records = self
            .log
            .list_recent(account_id, limit)?
            .iter()
            .map(|t| t.record())
            .collect();

        Ok(records)
    }

    pub fn accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.accounts()
    }

    pub fn transaction_count(&self, account_id: &AccountId) -> Result<usize, Error> {
        self.log.count(account_id)
    }
}
