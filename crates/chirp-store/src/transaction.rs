use std::collections::{BTreeMap, HashMap};

use chirp_types::Address;

use crate::account::Account;
use crate::error::{StoreError, StoreResult};

/// A staged view over committed accounts.
///
/// Reads see the transaction's own pending writes first, then the committed
/// state. Nothing becomes visible to other readers until the owning store
/// commits the transaction; dropping it discards every staged write.
pub struct Transaction<'a> {
    base: &'a HashMap<Address, Account>,
    // `None` marks a staged close.
    staged: BTreeMap<Address, Option<Account>>,
}

impl<'a> Transaction<'a> {
    /// Start a transaction over `base`.
    pub fn new(base: &'a HashMap<Address, Account>) -> Self {
        Self {
            base,
            staged: BTreeMap::new(),
        }
    }

    /// Read the account at `address` as this transaction currently sees it.
    pub fn get(&self, address: &Address) -> Option<&Account> {
        match self.staged.get(address) {
            Some(slot) => slot.as_ref(),
            None => self.base.get(address),
        }
    }

    /// Returns `true` if an account is live at `address`.
    pub fn exists(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }

    /// Create an account at an empty address.
    pub fn create(&mut self, address: Address, account: Account) -> StoreResult<()> {
        if self.exists(&address) {
            return Err(StoreError::AlreadyInUse(address));
        }
        self.staged.insert(address, Some(account));
        Ok(())
    }

    /// Replace the data of an existing account.
    pub fn update_data(&mut self, address: &Address, data: Vec<u8>) -> StoreResult<()> {
        let mut account = self
            .get(address)
            .cloned()
            .ok_or(StoreError::NotFound(*address))?;
        account.data = data;
        self.staged.insert(*address, Some(account));
        Ok(())
    }

    /// Remove the account at `address`, returning it so its deposit can be
    /// reclaimed.
    pub fn close(&mut self, address: &Address) -> StoreResult<Account> {
        let account = self
            .get(address)
            .cloned()
            .ok_or(StoreError::NotFound(*address))?;
        self.staged.insert(*address, None);
        Ok(account)
    }

    /// Consume the transaction, yielding its staged writes in address order.
    pub(crate) fn into_writes(self) -> BTreeMap<Address, Option<Account>> {
        self.staged
    }
}
