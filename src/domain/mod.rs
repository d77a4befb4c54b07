pub mod account;
pub mod error;
pub mod money;
pub mod request;
pub mod traits;
pub mod transaction;

pub use account::{Account, AccountId, normalize_email};
pub use error::Error;
pub use money::Amount;
pub use request::Request;
pub use traits::{AccountStore, BalanceCell, DeadLetterQueue, TransactionLog, TransactionStream};
pub use transaction::{Receipt, Transaction, TransactionId, TransactionKind, TransactionRecord};
