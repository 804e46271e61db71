/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so identical bytes hashed for different purposes (a comment
/// body versus an account type name) never produce the same digest.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for comment bodies used as address seeds.
    pub const COMMENT: Self = Self {
        domain: "chirp-comment-v1",
    };
    /// Hasher for account type discriminators.
    pub const ACCOUNT: Self = Self {
        domain: "chirp-account-v1",
    };
    /// Hasher for transaction signing payloads.
    pub const TRANSACTION: Self = Self {
        domain: "chirp-transaction-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// The first 8 bytes of the domain-separated digest.
    ///
    /// Used to tag account data with the record type it holds.
    pub fn discriminator(&self, name: &str) -> [u8; 8] {
        let digest = self.digest(name.as_bytes());
        let mut out = [0u8; 8];
        out.copy_from_slice(&digest[..8]);
        out
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &[u8; 32]) -> bool {
        self.digest(data) == *expected
    }

    /// Raw BLAKE3 hash without domain separation (for low-level use).
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        *blake3::hash(data).as_bytes()
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
