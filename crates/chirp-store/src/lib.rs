//! Address-keyed account storage for Chirp.
//!
//! Every record lives in an [`Account`] at a derived [`Address`]. The store
//! never chooses addresses and never interprets account data; it only
//! guarantees that a slot is either empty or holds exactly one account, and
//! that a group of writes lands together or not at all.
//!
//! # Storage Backends
//!
//! All backends implement the [`AccountStore`] trait:
//!
//! - [`InMemoryAccountStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Creating at an occupied address fails with [`StoreError::AlreadyInUse`].
//! 2. Every mutation happens inside [`AccountStore::transact`]; writes are
//!    staged in a [`Transaction`] and applied only if the closure succeeds.
//! 3. Record data has a fixed size per record type, tagged with an 8-byte
//!    discriminator (see [`AccountRecord`]).
//! 4. Closing an account hands its rent deposit back to the caller.
//!
//! [`Address`]: chirp_types::Address

pub mod account;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod traits;
pub mod transaction;

pub use account::{Account, Rent, ACCOUNT_STORAGE_OVERHEAD};
pub use error::{StoreError, StoreResult};
pub use lifecycle::{decode_account, decode_record, encode_record, AccountRecord, Closed};
pub use memory::InMemoryAccountStore;
pub use traits::AccountStore;
pub use transaction::Transaction;
