//! Record addresses.
//!
//! Each record type has its own namespace tag. Uniqueness rules live
//! entirely in which fields are seeded:
//!
//! - tweet: `[topic, TWEET_SEED, author]`, one per (author, topic)
//! - reaction: `[TWEET_REACTION_SEED, author, tweet]`, shared by both
//!   reaction kinds, so a like and a dislike from the same user collide
//! - comment: `[COMMENT_SEED, author, digest(content), tweet]`

use chirp_crypto::{create_program_address, find_program_address, ContentHasher, DerivedAddress};
use chirp_types::limits::MAX_TOPIC_LEN;
use chirp_types::{Address, Identity};

use crate::error::{ProgramError, ProgramResult};
use crate::state::{Comment, Reaction};

pub const TWEET_SEED: &[u8] = b"TWEET_SEED";
pub const TWEET_REACTION_SEED: &[u8] = b"TWEET_REACTION_SEED";
pub const COMMENT_SEED: &[u8] = b"COMMENT_SEED";

/// Derives record addresses under one program id.
#[derive(Clone, Copy, Debug)]
pub struct AddressDeriver {
    program_id: Address,
}

impl AddressDeriver {
    pub fn new(program_id: Address) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// Address of `author`'s tweet on `topic`.
    pub fn tweet(&self, author: &Identity, topic: &str) -> ProgramResult<DerivedAddress> {
        check_topic(topic)?;
        Ok(find_program_address(
            &[topic.as_bytes(), TWEET_SEED, author.as_ref()],
            &self.program_id,
        )?)
    }

    /// Address of `author`'s reaction to `tweet`.
    pub fn reaction(&self, author: &Identity, tweet: &Address) -> ProgramResult<DerivedAddress> {
        Ok(find_program_address(
            &[TWEET_REACTION_SEED, author.as_ref(), tweet.as_ref()],
            &self.program_id,
        )?)
    }

    /// Address of `author`'s comment with body `content` on `tweet`.
    pub fn comment(
        &self,
        author: &Identity,
        content: &str,
        tweet: &Address,
    ) -> ProgramResult<DerivedAddress> {
        let digest = ContentHasher::COMMENT.digest(content.as_bytes());
        Ok(find_program_address(
            &[COMMENT_SEED, author.as_ref(), &digest, tweet.as_ref()],
            &self.program_id,
        )?)
    }

    /// Check that `address` is where `reaction`'s own fields place it.
    pub fn verify_reaction(&self, reaction: &Reaction, address: &Address) -> ProgramResult<()> {
        let salt = [reaction.salt];
        self.verify(
            &[
                TWEET_REACTION_SEED,
                reaction.author.as_ref(),
                reaction.parent_tweet.as_ref(),
                &salt,
            ],
            address,
        )
    }

    /// Check that `address` is where `comment`'s own fields place it.
    pub fn verify_comment(&self, comment: &Comment, address: &Address) -> ProgramResult<()> {
        let digest = ContentHasher::COMMENT.digest(comment.content.as_bytes());
        let salt = [comment.salt];
        self.verify(
            &[
                COMMENT_SEED,
                comment.author.as_ref(),
                &digest,
                comment.parent_tweet.as_ref(),
                &salt,
            ],
            address,
        )
    }

    fn verify(&self, seeds: &[&[u8]], address: &Address) -> ProgramResult<()> {
        match create_program_address(seeds, &self.program_id) {
            Ok(expected) if expected == *address => Ok(()),
            _ => Err(ProgramError::AddressMismatch(*address)),
        }
    }
}

// Checked before any hashing so an oversized topic never reaches derivation.
pub(crate) fn check_topic(topic: &str) -> ProgramResult<()> {
    if topic.len() > MAX_TOPIC_LEN {
        return Err(ProgramError::SeedConstraintExceeded { len: topic.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ReactionKind;

    fn deriver() -> AddressDeriver {
        AddressDeriver::new(Address::from_label("chirp-test"))
    }

    fn alice() -> Identity {
        Identity::from_bytes([0xa1; 32])
    }

    fn bob() -> Identity {
        Identity::from_bytes([0xb0; 32])
    }

    #[test]
    fn tweet_address_is_deterministic() {
        let d = deriver();
        assert_eq!(d.tweet(&alice(), "Hello").unwrap(), d.tweet(&alice(), "Hello").unwrap());
    }

    #[test]
    fn tweet_address_depends_on_author_and_topic() {
        let d = deriver();
        let base = d.tweet(&alice(), "Hello").unwrap().address;
        assert_ne!(base, d.tweet(&bob(), "Hello").unwrap().address);
        assert_ne!(base, d.tweet(&alice(), "Hello!").unwrap().address);
    }

    #[test]
    fn topic_limit_is_inclusive() {
        let d = deriver();
        assert!(d.tweet(&alice(), &"A".repeat(MAX_TOPIC_LEN)).is_ok());
        assert_eq!(
            d.tweet(&alice(), &"A".repeat(MAX_TOPIC_LEN + 1)).unwrap_err(),
            ProgramError::SeedConstraintExceeded {
                len: MAX_TOPIC_LEN + 1
            }
        );
    }

    #[test]
    fn multibyte_topic_is_measured_in_bytes() {
        // 8 four-byte characters = 32 bytes; one more is over.
        let d = deriver();
        assert!(d.tweet(&alice(), &"🚀".repeat(8)).is_ok());
        assert!(d.tweet(&alice(), &"🚀".repeat(9)).is_err());
    }

    #[test]
    fn reaction_address_is_per_author_per_tweet() {
        let d = deriver();
        let t1 = Address::from_label("t1");
        let t2 = Address::from_label("t2");
        let a1 = d.reaction(&alice(), &t1).unwrap().address;
        assert_eq!(a1, d.reaction(&alice(), &t1).unwrap().address);
        assert_ne!(a1, d.reaction(&bob(), &t1).unwrap().address);
        assert_ne!(a1, d.reaction(&alice(), &t2).unwrap().address);
    }

    #[test]
    fn comment_address_uses_content_digest() {
        let d = deriver();
        let t = Address::from_label("t");
        let long = "x".repeat(500);
        let a = d.comment(&alice(), &long, &t).unwrap();
        assert_eq!(a, d.comment(&alice(), &long, &t).unwrap());
        assert_ne!(a.address, d.comment(&alice(), "other", &t).unwrap().address);
        assert_ne!(a.address, d.comment(&bob(), &long, &t).unwrap().address);
    }

    #[test]
    fn namespaces_do_not_collide() {
        let d = deriver();
        let t = Address::from_label("t");
        let reaction = d.reaction(&alice(), &t).unwrap().address;
        let comment = d.comment(&alice(), "", &t).unwrap().address;
        assert_ne!(reaction, comment);
    }

    #[test]
    fn verify_accepts_stored_fields() {
        let d = deriver();
        let tweet_at = d.tweet(&alice(), "Hello").unwrap();

        let reaction_at = d.reaction(&bob(), &tweet_at.address).unwrap();
        let reaction = Reaction {
            author: bob(),
            parent_tweet: tweet_at.address,
            kind: ReactionKind::Like,
            salt: reaction_at.salt,
        };
        d.verify_reaction(&reaction, &reaction_at.address).unwrap();

        let comment_at = d.comment(&bob(), "nice", &tweet_at.address).unwrap();
        let comment = Comment {
            author: bob(),
            parent_tweet: tweet_at.address,
            content: "nice".into(),
            salt: comment_at.salt,
        };
        d.verify_comment(&comment, &comment_at.address).unwrap();
    }

    #[test]
    fn verify_rejects_forged_author() {
        let d = deriver();
        let t = Address::from_label("t");
        let at = d.reaction(&bob(), &t).unwrap();
        let forged = Reaction {
            author: alice(),
            parent_tweet: t,
            kind: ReactionKind::Like,
            salt: at.salt,
        };
        assert_eq!(
            d.verify_reaction(&forged, &at.address),
            Err(ProgramError::AddressMismatch(at.address))
        );
    }
}
