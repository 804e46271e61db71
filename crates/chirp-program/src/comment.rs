use chirp_crypto::DerivedAddress;
use chirp_store::{decode_account, AccountStore, Transaction};
use chirp_types::limits::MAX_COMMENT_LEN;
use chirp_types::{Address, Identity};
use tracing::debug;

use crate::address::AddressDeriver;
use crate::config::ProgramConfig;
use crate::error::{ProgramError, ProgramResult};
use crate::guard::AuthorizationGuard;
use crate::state::{Comment, Reclaimed};
use crate::tweet::TweetStore;

/// Owns comment records.
///
/// A comment's address is seeded with a digest of its body, so one author
/// can post any number of distinct comments on a tweet but not the same
/// text twice while the first copy is live.
pub struct CommentStore<'a> {
    config: &'a ProgramConfig,
    deriver: AddressDeriver,
    tweets: TweetStore<'a>,
}

impl<'a> CommentStore<'a> {
    pub fn new(config: &'a ProgramConfig) -> Self {
        Self {
            config,
            deriver: AddressDeriver::new(config.program_id),
            tweets: TweetStore::new(config),
        }
    }

    /// Attach `content` from `author` to `tweet`.
    pub fn add(
        &self,
        txn: &mut Transaction<'_>,
        author: &Identity,
        tweet: &Address,
        content: &str,
    ) -> ProgramResult<DerivedAddress> {
        if content.len() > MAX_COMMENT_LEN {
            return Err(ProgramError::CommentTooLong { len: content.len() });
        }
        self.tweets.load(txn, tweet)?;
        let derived = self.deriver.comment(author, content, tweet)?;

        let comment = Comment {
            author: *author,
            parent_tweet: *tweet,
            content: content.to_owned(),
            salt: derived.salt,
        };
        let deposit = txn.create_record(
            derived.address,
            &self.config.program_id,
            &comment,
            &self.config.rent,
        )?;

        debug!(comment = %derived.address, tweet = %tweet, author = %author, deposit, "comment added");
        Ok(derived)
    }

    /// Destroy the comment at `address`. Only its author may do so.
    pub fn remove(
        &self,
        txn: &mut Transaction<'_>,
        author: &Identity,
        address: &Address,
    ) -> ProgramResult<Reclaimed> {
        let program_id = &self.config.program_id;
        let comment: Comment = txn.load_record(address, program_id)?;
        AuthorizationGuard::ensure_author(author, &comment, address)?;
        self.deriver.verify_comment(&comment, address)?;

        let closed = txn.close_record::<Comment>(address, program_id)?;

        debug!(
            comment = %address,
            tweet = %comment.parent_tweet,
            author = %author,
            lamports = closed.lamports,
            "comment removed"
        );
        Ok(Reclaimed {
            address: *address,
            to: *author,
            lamports: closed.lamports,
        })
    }

    /// Read a committed comment.
    pub fn fetch<S: AccountStore>(&self, store: &S, address: &Address) -> ProgramResult<Comment> {
        let account = store
            .get(address)?
            .ok_or(ProgramError::AccountNotFound(*address))?;
        Ok(decode_account(address, &account, &self.config.program_id)?)
    }
}
