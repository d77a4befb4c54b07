use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{AccountStore, Error, TransactionKind, TransactionLog};
use crate::ledger::LedgerService;

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    account: &'a str,
    balance: Decimal,
    transactions: usize,
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    account: &'a str,
    tx: u64,
    kind: TransactionKind,
    amount: Decimal,
}

/// Writes balances, then each account's recent history, as CSV.
pub fn write_report<S, L, W>(ledger: &LedgerService<S, L>, out: W) -> Result<(), Error>
where
    S: AccountStore,
    L: TransactionLog,
    W: Write,
{
    let mut accounts = ledger.accounts()?;
    accounts.sort_by(|a, b| a.email.cmp(&b.email));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(out);

    wtr.write_record(["account", "balance", "transactions"])?;
    for account in &accounts {
        wtr.serialize(BalanceRow {
            account: &account.email,
            balance: account.balance,
            transactions: ledger.transaction_count(&account.id)?,
        })?;
    }

    wtr.write_record(["account", "tx", "kind", "amount"])?;
    for account in &accounts {
        for record in ledger.history(&account.id, None)? {
            wtr.serialize(HistoryRow {
                account: &account.email,
                tx: record.id,
                kind: record.kind,
                amount: record.amount,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account_store::MemoryAccountStore;
    use crate::config::LedgerConfig;
    use crate::transaction_log::MemoryTransactionLog;

    #[test]
    fn report_lists_balances_then_newest_first_history() {
        let ledger = LedgerService::new(
            MemoryAccountStore::new(),
            MemoryTransactionLog::new(),
            LedgerConfig {
                history_limit: 1,
                ..LedgerConfig::default()
            },
        );
        let bob = ledger.register("bob@example.com").unwrap().id;
        ledger.register("alice@example.com").unwrap();
        ledger.deposit(&bob, Decimal::from(10)).unwrap();
        ledger.withdraw(&bob, Decimal::from(4)).unwrap();

        let mut out = Vec::new();
        write_report(&ledger, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "account,balance,transactions\n\
             alice@example.com,0,0\n\
             bob@example.com,6,2\n\
             account,tx,kind,amount\n\
             bob@example.com,2,withdraw,4\n"
        );
    }
}
