use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use tracing::debug;

use crate::domain::{AccountId, Amount, Error, Transaction, TransactionKind, TransactionLog};

type Stream = Arc<Mutex<Vec<Transaction>>>;

/// Append-only in-process log, one stream per account.
#[derive(Default, Debug)]
pub struct MemoryTransactionLog {
    streams: RwLock<HashMap<AccountId, Stream>>,
    sequence: AtomicU64,
}

impl MemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&self, account_id: &AccountId) -> Result<Option<Stream>, Error> {
        let streams = self
            .streams
            .read()
            .map_err(|_| Error::Durability("log index lock poisoned".to_string()))?;
        Ok(streams.get(account_id).cloned())
    }

    fn stream_or_create(&self, account_id: &AccountId) -> Result<Stream, Error> {
        if let Some(stream) = self.stream(account_id)? {
            return Ok(stream);
        }

        let mut streams = self
            .streams
            .write()
            .map_err(|_| Error::Durability("log index lock poisoned".to_string()))?;
        Ok(Arc::clone(streams.entry(account_id.clone()).or_default()))
    }
}

impl TransactionLog for MemoryTransactionLog {
    fn append(
        &self,
        account_id: &AccountId,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, Error> {
        let stream = self.stream_or_create(account_id)?;
        let mut stream = stream
            .lock()
            .map_err(|_| Error::Durability("log stream lock poisoned".to_string()))?;

        let transaction = Transaction {
            id: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: account_id.clone(),
            kind,
            amount,
            occurred_at: Utc::now(),
        };

        stream.push(transaction.clone());
        debug!(%transaction, "transaction appended");

        Ok(transaction)
    }

    fn list_recent(&self, account_id: &AccountId, limit: usize) -> Result<Vec<Transaction>, Error> {
        let Some(stream) = self.stream(account_id)? else {
            return Ok(Vec::new());
        };

        let mut recent = stream
            .lock()
            .map_err(|_| Error::Durability("log stream lock poisoned".to_string()))?
            .clone();

        recent.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent.truncate(limit);

        Ok(recent)
    }

    fn count(&self, account_id: &AccountId) -> Result<usize, Error> {
        match self.stream(account_id)? {
            Some(stream) => stream
                .lock()
                .map(|s| s.len())
                .map_err(|_| Error::Durability("log stream lock poisoned".to_string())),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn amount(v: i64) -> Amount {
        Amount::new(Decimal::from(v)).unwrap()
    }

    #[test]
    fn recent_is_newest_first_and_capped() {
        let log = MemoryTransactionLog::new();
        let id = AccountId::from("a");

        for v in 1..=5 {
            log.append(&id, TransactionKind::Deposit, amount(v)).unwrap();
        }

        let recent = log.list_recent(&id, 3).unwrap();
        let amounts: Vec<_> = recent.iter().map(|t| t.amount.value()).collect();
        assert_eq!(
            amounts,
            vec![Decimal::from(5), Decimal::from(4), Decimal::from(3)]
        );
        assert_eq!(log.count(&id).unwrap(), 5);
    }

    #[test]
    fn ids_are_monotonic_across_accounts() {
        let log = MemoryTransactionLog::new();
        let a = log
            .append(&AccountId::from("a"), TransactionKind::Deposit, amount(1))
            .unwrap();
        let b = log
            .append(&AccountId::from("b"), TransactionKind::Withdraw, amount(1))
            .unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn unknown_account_has_empty_history() {
        let log = MemoryTransactionLog::new();
        assert!(log.list_recent(&AccountId::from("x"), 50).unwrap().is_empty());
        assert_eq!(log.count(&AccountId::from("x")).unwrap(), 0);
    }
}
