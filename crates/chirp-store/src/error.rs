use chirp_types::Address;

/// Errors from account store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Attempted to create an account at an occupied address.
    #[error("account {0} already in use")]
    AlreadyInUse(Address),

    /// No account exists at the address.
    #[error("account {0} does not exist")]
    NotFound(Address),

    /// The account belongs to a different program.
    #[error("account {address} is owned by {actual}, expected {expected}")]
    WrongOwner {
        address: Address,
        expected: Address,
        actual: Address,
    },

    /// The account data is not tagged as the requested record type.
    #[error("account {address} does not hold a {expected} record")]
    DiscriminatorMismatch {
        address: Address,
        expected: &'static str,
    },

    /// An encoded record does not fit in its declared layout.
    #[error("{name} record is {len} bytes, layout allows {space}")]
    RecordTooLarge {
        name: &'static str,
        len: usize,
        space: usize,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The rent deposit for an account does not fit in a `u64`.
    #[error("rent deposit for {data_len} data bytes overflows")]
    RentOverflow { data_len: usize },

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
