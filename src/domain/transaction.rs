use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{AccountId, Amount};

pub type TransactionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// Balance delta this kind of movement applies for `amount`.
    pub fn signed(&self, amount: Amount) -> Decimal {
        match self {
            TransactionKind::Deposit => amount.value(),
            TransactionKind::Withdraw => -amount.value(),
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("deposit"),
            TransactionKind::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// An immutable, committed movement on one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Shape handed to callers; the owning account stays internal.
    pub fn record(&self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            kind: self.kind,
            amount: self.amount.value(),
            occurred_at: self.occurred_at,
        }
    }
}

impl core::fmt::Display for Transaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{},account={},tx={},amount={}",
            self.kind, self.account_id, self.id, self.amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Post-commit state returned by every successful deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub balance: Decimal,
    pub transaction: TransactionRecord,
}
