use rust_decimal::Decimal;

use crate::domain::AccountId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds on account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Balance of account {account} would overflow: balance {balance}, delta {delta}")]
    BalanceOverflow {
        account: AccountId,
        balance: Decimal,
        delta: Decimal,
    },

    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    #[error("No account is registered for {0}")]
    UnknownEmail(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Email {0} is already registered")]
    EmailTaken(String),

    #[error("Storage failed with: {0}")]
    Durability(String),
}

impl Error {
    /// Only storage failures leave nothing behind and are worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Durability(_))
    }
}
