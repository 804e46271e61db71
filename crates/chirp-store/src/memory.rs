use std::collections::HashMap;
use std::sync::RwLock;

use chirp_types::Address;
use tracing::debug;

use crate::account::Account;
use crate::error::{StoreError, StoreResult};
use crate::traits::AccountStore;
use crate::transaction::Transaction;

/// In-memory, HashMap-based account store.
///
/// Intended for tests and embedding. Accounts are held behind a single
/// `RwLock`; a transaction keeps the write lock for its whole closure, which
/// is what makes each operation a single indivisible state transition.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Address, Account>>,
}

impl InMemoryAccountStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live accounts.
    pub fn len(&self) -> StoreResult<usize> {
        let map = self.accounts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.len())
    }

    /// Returns `true` if no accounts are live.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Sum of all deposits held by live accounts.
    pub fn total_lamports(&self) -> StoreResult<u64> {
        let map = self.accounts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.values().map(|account| account.lamports).sum())
    }

    /// Sorted list of all live addresses.
    pub fn addresses(&self) -> StoreResult<Vec<Address>> {
        let map = self.accounts.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut addresses: Vec<Address> = map.keys().copied().collect();
        addresses.sort();
        Ok(addresses)
    }

    /// Copy of every live account, keyed by address.
    pub fn snapshot(&self) -> StoreResult<HashMap<Address, Account>> {
        let map = self.accounts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.clone())
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, address: &Address) -> StoreResult<Option<Account>> {
        let map = self.accounts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(address).cloned())
    }

    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut map = self.accounts.write().map_err(|_| StoreError::LockPoisoned)?;

        let mut txn = Transaction::new(&map);
        let value = f(&mut txn)?;
        let writes = txn.into_writes();

        let count = writes.len();
        for (address, slot) in writes {
            match slot {
                Some(account) => {
                    map.insert(address, account);
                }
                None => {
                    map.remove(&address);
                }
            }
        }
        debug!(writes = count, live = map.len(), "transaction committed");
        Ok(value)
    }
}

impl std::fmt::Debug for InMemoryAccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAccountStore")
            .field("account_count", &self.len().ok())
            .finish()
    }
}
