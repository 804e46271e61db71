//! Ed25519 keys for acting identities.
//!
//! An [`Identity`] is exactly the 32 bytes of an ed25519 public key, so a
//! signer can always be recovered from the identity a transaction names.

use chirp_types::Identity;
use ed25519_dalek::Signer as _;
use serde::{Deserialize, Serialize};

/// Secret key of a user. Never serialized; `Debug` hides it.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

/// Public half of a user's key.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

/// A 64-byte ed25519 signature.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_bytes")] ed25519_dalek::Signature);

/// Errors from signature checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature does not match message and key")]
    InvalidSignature,
    #[error("identity is not an ed25519 public key")]
    InvalidKey,
}

impl SigningKey {
    /// Fresh key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let inner = ed25519_dalek::SigningKey::generate(&mut rand::thread_rng());
        Self { inner }
    }

    /// Key from a 32-byte secret seed. The same seed always yields the same
    /// identity.
    pub fn from_bytes(secret: [u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(&secret),
        }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// The identity this key acts as.
    pub fn identity(&self) -> Identity {
        Identity::from_bytes(self.inner.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.inner.sign(message))
    }
}

impl VerifyingKey {
    /// Recover the key behind `identity`.
    ///
    /// Fails for bytes that do not decode to a curve point, which includes
    /// every derived record address.
    pub fn from_identity(identity: &Identity) -> Result<Self, SignatureError> {
        ed25519_dalek::VerifyingKey::from_bytes(identity.as_bytes())
            .map(|inner| Self { inner })
            .map_err(|_| SignatureError::InvalidKey)
    }

    pub fn identity(&self) -> Identity {
        Identity::from_bytes(self.inner.to_bytes())
    }

    /// Check `signature` over `message`. Uses strict verification, so
    /// malleable encodings of a valid signature are refused.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.inner
            .verify_strict(message, &signature.0)
            .map_err(|_| SignatureError::InvalidSignature)
    }
}

impl Signature {
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(ed25519_dalek::Signature::from_bytes(&bytes))
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey({}, secret hidden)", self.identity().short_id())
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({})", self.identity().short_id())
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Signature({}..)", hex::encode(&bytes[..6]))
    }
}

// Signatures travel as a 64-byte blob. ed25519-dalek's own serde impl is a
// fixed array, which bincode and JSON encode differently from a byte string.
mod signature_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        signature: &ed25519_dalek::Signature,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&signature.to_bytes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ed25519_dalek::Signature, D::Error> {
        let raw = Vec::<u8>::deserialize(deserializer)?;
        let bytes: [u8; 64] = raw
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(raw.len(), &"64 signature bytes"))?;
        Ok(ed25519_dalek::Signature::from_bytes(&bytes))
    }
}
