use chirp_types::Address;

use crate::account::Account;
use crate::error::{StoreError, StoreResult};
use crate::transaction::Transaction;

/// Address-keyed account store.
///
/// All implementations must satisfy these invariants:
/// - An address holds at most one account. Creating at an occupied address
///   fails with `AlreadyInUse`; there is no implicit overwrite.
/// - `transact` is all-or-nothing: the closure's staged writes are applied
///   only when it returns `Ok`, and no other writer observes or interleaves
///   with them.
/// - Reads outside a transaction see only committed state.
pub trait AccountStore: Send + Sync {
    /// Read the account at `address`.
    ///
    /// Returns `Ok(None)` if the slot is empty.
    fn get(&self, address: &Address) -> StoreResult<Option<Account>>;

    /// Check whether an account exists at `address`.
    fn exists(&self, address: &Address) -> StoreResult<bool> {
        Ok(self.get(address)?.is_some())
    }

    /// Run `f` against a staged view of the store and commit its writes
    /// atomically if it succeeds.
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<StoreError>;
}
