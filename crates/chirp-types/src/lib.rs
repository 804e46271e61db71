//! Foundation types for Chirp.
//!
//! Every other Chirp crate depends on `chirp-types`. It defines the two
//! 32-byte primitives the account model is built on and the byte limits
//! that fix each record's layout.
//!
//! # Key Types
//!
//! - [`Identity`]: An actor, represented by its ed25519 public key
//! - [`Address`]: A storage slot in the account store
//! - [`limits`]: Maximum topic, content, and seed lengths

pub mod address;
pub mod error;
pub mod identity;
pub mod limits;

pub use address::Address;
pub use error::TypeError;
pub use identity::Identity;
