use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use crate::domain::{
    AccountStore, Error, Request, TransactionLog,
    traits::{DeadLetterQueue, TransactionStream},
};
use crate::ledger::LedgerService;

/// Counts of what one batch run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
}

/// Drives a stream of requests through the ledger, one at a time and in order.
#[derive(Debug)]
pub struct Engine<I, D, S, L>
where
    I: TransactionStream,
    D: DeadLetterQueue,
    S: AccountStore,
    L: TransactionLog,
{
    ingestion: I,
    ledger: Arc<LedgerService<S, L>>,
    dlq: D,
}

impl<I, D, S, L> Engine<I, D, S, L>
where
    I: TransactionStream,
    D: DeadLetterQueue,
    S: AccountStore,
    L: TransactionLog,
{
    pub fn new(ingestion: I, ledger: Arc<LedgerService<S, L>>, dlq: D) -> Self {
        Self {
            ingestion,
            ledger,
            dlq,
        }
    }

    pub async fn process(&mut self) -> Result<Summary, Error> {
        let mut res = self.ingestion.stream();
        let mut summary = Summary::default();

        while let Some(request) = res.next().await {
            match request.and_then(|request| self.handle(request)) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    summary.rejected += 1;
                    self.dlq.report(&e);
                }
            }
        }

        info!(
            applied = summary.applied,
            rejected = summary.rejected,
            "batch processed"
        );
        Ok(summary)
    }

    fn handle(&self, request: Request) -> Result<(), Error> {
        debug!(%request, "handling request");

        match request {
            Request::Register { email } => self.ledger.register(&email).map(|_| ()),
            Request::Move {
                email,
                kind,
                amount,
            } => {
                let account_id = self.ledger.resolve(&email)?;
                self.ledger
                    .apply(&account_id, kind, amount.value())
                    .map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::account_store::MemoryAccountStore;
    use crate::config::LedgerConfig;
    use crate::domain::Amount;
    use crate::ingestion::CsvReader;
    use crate::transaction_log::MemoryTransactionLog;

    #[derive(Default)]
    struct CollectingDlq {
        errors: Mutex<Vec<String>>,
    }

    impl DeadLetterQueue for &CollectingDlq {
        fn report(&self, error: &Error) {
            self.errors.lock().unwrap().push(error.to_string());
        }
    }

    #[tokio::test]
    async fn bad_rows_are_dead_lettered_and_the_rest_applied() {
        let input = "type, account, amount\n\
                     register, alice@example.com,\n\
                     register, ALICE@example.com,\n\
                     deposit, alice@example.com, 100\n\
                     withdraw, Alice@Example.com, 30\n\
                     withdraw, alice@example.com, 1000\n\
                     deposit, bob@example.com, 5\n\
                     deposit, alice@example.com, -1\n";

        let ledger = Arc::new(LedgerService::new(
            MemoryAccountStore::new(),
            MemoryTransactionLog::new(),
            LedgerConfig::default(),
        ));
        let dlq = CollectingDlq::default();
        let reader = CsvReader::new(input.as_bytes(), Amount::DEFAULT_SCALE);

        let mut engine = Engine::new(reader, Arc::clone(&ledger), &dlq);
        let summary = engine.process().await.unwrap();

        assert_eq!(
            summary,
            Summary {
                applied: 3,
                rejected: 4
            }
        );
        assert_eq!(dlq.errors.lock().unwrap().len(), 4);

        let alice = ledger.resolve("alice@example.com").unwrap();
        assert_eq!(ledger.balance(&alice).unwrap(), Decimal::from(70));
        assert_eq!(ledger.transaction_count(&alice).unwrap(), 2);
    }
}
