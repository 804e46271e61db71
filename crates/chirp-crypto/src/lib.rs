//! Cryptographic primitives for Chirp.
//!
//! Provides domain-separated BLAKE3 digests, seed-based address derivation
//! with a disambiguating salt, and Ed25519 signing/verification.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod address;
pub mod hasher;
pub mod signer;

pub use address::{
    create_program_address, find_program_address, is_on_curve, DeriveError, DerivedAddress,
};
pub use hasher::ContentHasher;
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
