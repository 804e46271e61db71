use chirp_crypto::DeriveError;
use chirp_store::StoreError;
use chirp_types::limits::{MAX_COMMENT_LEN, MAX_CONTENT_LEN, MAX_SEED_LEN};
use chirp_types::{Address, Identity};

/// Errors produced by program operations.
///
/// Every error is a full rejection: the operation that returned it made no
/// change to the account store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("seed is {len} bytes; address seeds are limited to {MAX_SEED_LEN}")]
    SeedConstraintExceeded { len: usize },

    #[error("tweet content is {len} bytes; the limit is {MAX_CONTENT_LEN}")]
    ContentTooLong { len: usize },

    #[error("comment is {len} bytes; the limit is {MAX_COMMENT_LEN}")]
    CommentTooLong { len: usize },

    #[error("account {0} already in use")]
    AlreadyInUse(Address),

    #[error("account {0} not found")]
    AccountNotFound(Address),

    #[error("{actor} is not the author of {address}")]
    Unauthorized { actor: Identity, address: Address },

    #[error("account {0} does not match the address derived from its fields")]
    AddressMismatch(Address),

    #[error("like counter is at its maximum")]
    MaxLikesReached,

    #[error("dislike counter is at its maximum")]
    MaxDislikesReached,

    #[error("like counter is already zero")]
    MinLikesReached,

    #[error("dislike counter is already zero")]
    MinDislikesReached,

    #[error("missing valid signature from {0}")]
    MissingRequiredSignature(Identity),

    #[error("account {0} is owned by another program")]
    AccountOwnedByWrongProgram(Address),

    #[error("account {address} does not hold a {expected} record")]
    AccountDiscriminatorMismatch {
        address: Address,
        expected: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("address derivation failed: {0}")]
    Derive(DeriveError),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl ProgramError {
    /// Returns `true` for the outcomes an unauthorized caller can observe.
    ///
    /// A caller who is not a record's author either names the record
    /// directly and is refused, or derives an address from their own
    /// identity and finds nothing there.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::AccountNotFound(_) | Self::AddressMismatch(_)
        )
    }
}

impl From<StoreError> for ProgramError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyInUse(address) => Self::AlreadyInUse(address),
            StoreError::NotFound(address) => Self::AccountNotFound(address),
            StoreError::WrongOwner { address, .. } => Self::AccountOwnedByWrongProgram(address),
            StoreError::DiscriminatorMismatch { address, expected } => {
                Self::AccountDiscriminatorMismatch { address, expected }
            }
            other => Self::Store(other),
        }
    }
}

impl From<DeriveError> for ProgramError {
    fn from(err: DeriveError) -> Self {
        match err {
            DeriveError::SeedTooLong { len, .. } => Self::SeedConstraintExceeded { len },
            other => Self::Derive(other),
        }
    }
}

/// Result alias for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;
