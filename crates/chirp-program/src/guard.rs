use chirp_types::{Address, Identity};

use crate::error::{ProgramError, ProgramResult};
use crate::instruction::SignedTransaction;
use crate::state::{Comment, Reaction, Tweet};

/// A record with a single author allowed to mutate or destroy it.
pub trait Authored {
    fn author(&self) -> &Identity;
}

impl Authored for Tweet {
    fn author(&self) -> &Identity {
        &self.author
    }
}

impl Authored for Reaction {
    fn author(&self) -> &Identity {
        &self.author
    }
}

impl Authored for Comment {
    fn author(&self) -> &Identity {
        &self.author
    }
}

/// Stateless authorization checks run before any mutation.
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Require `actor` to be the stored author of `record`.
    pub fn ensure_author<R: Authored>(
        actor: &Identity,
        record: &R,
        address: &Address,
    ) -> ProgramResult<()> {
        if record.author() != actor {
            return Err(ProgramError::Unauthorized {
                actor: *actor,
                address: *address,
            });
        }
        Ok(())
    }

    /// Require the transaction to carry a valid signature from its
    /// declared signer.
    pub fn ensure_signed(transaction: &SignedTransaction) -> ProgramResult<()> {
        transaction.verify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: Identity) -> Comment {
        Comment {
            author,
            parent_tweet: Address::from_label("t"),
            content: "hi".into(),
            salt: 255,
        }
    }

    #[test]
    fn author_passes() {
        let author = Identity::from_bytes([1; 32]);
        let address = Address::from_label("c");
        assert!(AuthorizationGuard::ensure_author(&author, &comment(author), &address).is_ok());
    }

    #[test]
    fn non_author_is_unauthorized() {
        let author = Identity::from_bytes([1; 32]);
        let intruder = Identity::from_bytes([2; 32]);
        let address = Address::from_label("c");
        assert_eq!(
            AuthorizationGuard::ensure_author(&intruder, &comment(author), &address),
            Err(ProgramError::Unauthorized {
                actor: intruder,
                address
            })
        );
    }
}
