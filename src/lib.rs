pub mod account_store;
pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod ledger;
pub mod report;
pub mod telemetry;
pub mod transaction_log;

pub use account_store::MemoryAccountStore;
pub use config::{Config, LedgerConfig};
pub use domain::{AccountId, Amount, Error, Receipt, TransactionKind, TransactionRecord};
pub use ledger::LedgerService;
pub use transaction_log::MemoryTransactionLog;
