use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::domain::{Account, AccountId, AccountStore, BalanceCell, Error, normalize_email};

#[derive(Default, Debug)]
struct Accounts {
    by_id: HashMap<AccountId, Arc<Mutex<Account>>>,
    by_email: HashMap<String, AccountId>,
}

/// In-process account store with one lock per account.
///
/// The outer `RwLock` is only written on registration, so deltas on
/// different accounts never wait on each other.
#[derive(Default, Debug)]
pub struct MemoryAccountStore {
    accounts: RwLock<Accounts>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, account_id: &AccountId) -> Result<Arc<Mutex<Account>>, Error> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| Error::Durability("account index lock poisoned".to_string()))?;

        accounts
            .by_id
            .get(account_id)
            .cloned()
            .ok_or_else(|| Error::AccountNotFound(account_id.clone()))
    }

    fn snapshot(slot: &Mutex<Account>) -> Result<Account, Error> {
        slot.lock()
            .map(|account| account.clone())
            .map_err(|_| Error::Durability("account lock poisoned".to_string()))
    }
}

impl AccountStore for MemoryAccountStore {
    fn create(&self, email: &str) -> Result<Account, Error> {
        let email = normalize_email(email)?;

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| Error::Durability("account index lock poisoned".to_string()))?;

        let account = match accounts.by_email.entry(email.clone()) {
            Entry::Occupied(_) => return Err(Error::EmailTaken(email)),
            Entry::Vacant(e) => {
                let account = Account::new(email);
                e.insert(account.id.clone());
                account
            }
        };

        accounts
            .by_id
            .insert(account.id.clone(), Arc::new(Mutex::new(account.clone())));

        debug!(account = %account.id, email = %account.email, "account created");
        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let email = normalize_email(email)?;

        let slot = {
            let accounts = self
                .accounts
                .read()
                .map_err(|_| Error::Durability("account index lock poisoned".to_string()))?;

            match accounts.by_email.get(&email) {
                Some(id) => accounts.by_id.get(id).cloned(),
                None => None,
            }
        };

        slot.map(|slot| Self::snapshot(&slot)).transpose()
    }

    fn get(&self, account_id: &AccountId) -> Result<Account, Error> {
        let slot = self.slot(account_id)?;
        Self::snapshot(&slot)
    }

    fn accounts(&self) -> Result<Vec<Account>, Error> {
        let slots: Vec<_> = {
            let accounts = self
                .accounts
                .read()
                .map_err(|_| Error::Durability("account index lock poisoned".to_string()))?;
            accounts.by_id.values().cloned().collect()
        };

        slots.iter().map(|slot| Self::snapshot(slot)).collect()
    }

    fn atomically<T, F>(&self, account_id: &AccountId, unit: F) -> Result<T, Error>
    where
        F: FnOnce(&mut BalanceCell) -> Result<T, Error>,
    {
        let slot = self.slot(account_id)?;
        let mut account = slot
            .lock()
            .map_err(|_| Error::Durability("account lock poisoned".to_string()))?;

        let mut cell = BalanceCell::new(account.id.clone(), account.balance);
        let out = unit(&mut cell)?;

        // Only reached when the whole unit succeeded.
        account.balance = cell.balance();
        debug!(account = %account.id, balance = %account.balance, "balance committed");

        Ok(out)
    }
}
