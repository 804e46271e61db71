//! Typed record lifecycle: create-if-absent, read, rewrite, and
//! destroy-and-reclaim on top of a [`Transaction`].
//!
//! Record bytes are laid out as an 8-byte discriminator followed by the
//! bincode encoding of the record, zero-padded to the record's fixed
//! `SPACE`. The padding lets a record's variable-length fields change
//! without ever resizing its account.

use chirp_crypto::ContentHasher;
use chirp_types::Address;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::account::{Account, Rent};
use crate::error::{StoreError, StoreResult};
use crate::transaction::Transaction;

/// Length of the type tag at the start of every record account.
pub const DISCRIMINATOR_LEN: usize = 8;

/// A record type that can live in an account.
pub trait AccountRecord: Serialize + DeserializeOwned {
    /// Type name, hashed into the discriminator.
    const NAME: &'static str;

    /// Total account data size, discriminator included.
    const SPACE: usize;

    /// Tag identifying this record type in account data.
    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        ContentHasher::ACCOUNT.discriminator(&format!("account:{}", Self::NAME))
    }
}

/// A destroyed record together with the deposit it released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Closed<R> {
    pub record: R,
    pub lamports: u64,
}

/// Encode `record` into its fixed-size account layout.
pub fn encode_record<R: AccountRecord>(record: &R) -> StoreResult<Vec<u8>> {
    let body = bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let len = DISCRIMINATOR_LEN + body.len();
    if len > R::SPACE {
        return Err(StoreError::RecordTooLarge {
            name: R::NAME,
            len,
            space: R::SPACE,
        });
    }

    let mut data = Vec::with_capacity(R::SPACE);
    data.extend_from_slice(&R::discriminator());
    data.extend_from_slice(&body);
    data.resize(R::SPACE, 0);
    Ok(data)
}

/// Decode a record from account data, checking its discriminator.
pub fn decode_record<R: AccountRecord>(address: &Address, data: &[u8]) -> StoreResult<R> {
    if data.len() < DISCRIMINATOR_LEN || data[..DISCRIMINATOR_LEN] != R::discriminator() {
        return Err(StoreError::DiscriminatorMismatch {
            address: *address,
            expected: R::NAME,
        });
    }
    bincode::deserialize(&data[DISCRIMINATOR_LEN..])
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a record from an account, checking that `owner` owns it.
pub fn decode_account<R: AccountRecord>(
    address: &Address,
    account: &Account,
    owner: &Address,
) -> StoreResult<R> {
    if account.owner != *owner {
        return Err(StoreError::WrongOwner {
            address: *address,
            expected: *owner,
            actual: account.owner,
        });
    }
    decode_record(address, &account.data)
}

impl Transaction<'_> {
    /// Allocate a rent-exempt account for `record` at an empty address.
    ///
    /// Returns the deposit locked in the new account.
    pub fn create_record<R: AccountRecord>(
        &mut self,
        address: Address,
        owner: &Address,
        record: &R,
        rent: &Rent,
    ) -> StoreResult<u64> {
        let data = encode_record(record)?;
        let lamports = rent.minimum_balance(R::SPACE)?;
        self.create(address, Account::new(*owner, lamports, data))?;
        Ok(lamports)
    }

    /// Read and decode the record at `address`.
    pub fn load_record<R: AccountRecord>(&self, address: &Address, owner: &Address) -> StoreResult<R> {
        let account = self.get(address).ok_or(StoreError::NotFound(*address))?;
        decode_account(address, account, owner)
    }

    /// Overwrite an existing record of the same type in place.
    pub fn store_record<R: AccountRecord>(
        &mut self,
        address: &Address,
        owner: &Address,
        record: &R,
    ) -> StoreResult<()> {
        // Type and ownership must match what is already there.
        self.load_record::<R>(address, owner)?;
        let data = encode_record(record)?;
        self.update_data(address, data)
    }

    /// Destroy the record at `address`, releasing its deposit.
    pub fn close_record<R: AccountRecord>(
        &mut self,
        address: &Address,
        owner: &Address,
    ) -> StoreResult<Closed<R>> {
        let record = self.load_record::<R>(address, owner)?;
        let account = self.close(address)?;
        Ok(Closed {
            record,
            lamports: account.lamports,
        })
    }
}
