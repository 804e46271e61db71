use chirp_crypto::DerivedAddress;
use chirp_store::{decode_account, AccountStore, Transaction};
use chirp_types::limits::MAX_CONTENT_LEN;
use chirp_types::{Address, Identity};
use tracing::debug;

use crate::address::{check_topic, AddressDeriver};
use crate::config::ProgramConfig;
use crate::error::{ProgramError, ProgramResult};
use crate::state::Tweet;

/// Owns tweet records.
///
/// Tweets are created once and never deleted. Topic and content are fixed
/// at creation; only the reaction counters change afterwards, and only
/// through [`ReactionLedger`](crate::reaction::ReactionLedger).
pub struct TweetStore<'a> {
    config: &'a ProgramConfig,
    deriver: AddressDeriver,
}

impl<'a> TweetStore<'a> {
    pub fn new(config: &'a ProgramConfig) -> Self {
        Self {
            config,
            deriver: AddressDeriver::new(config.program_id),
        }
    }

    /// Create `author`'s tweet on `topic` with zeroed counters.
    pub fn initialize(
        &self,
        txn: &mut Transaction<'_>,
        author: &Identity,
        topic: &str,
        content: &str,
    ) -> ProgramResult<DerivedAddress> {
        check_topic(topic)?;
        if content.len() > MAX_CONTENT_LEN {
            return Err(ProgramError::ContentTooLong { len: content.len() });
        }
        let derived = self.deriver.tweet(author, topic)?;

        let tweet = Tweet {
            author: *author,
            topic: topic.to_owned(),
            content: content.to_owned(),
            likes: 0,
            dislikes: 0,
            salt: derived.salt,
        };
        let deposit = txn.create_record(
            derived.address,
            &self.config.program_id,
            &tweet,
            &self.config.rent,
        )?;

        debug!(tweet = %derived.address, author = %author, topic, deposit, "tweet initialized");
        Ok(derived)
    }

    /// Read a committed tweet.
    pub fn fetch<S: AccountStore>(&self, store: &S, address: &Address) -> ProgramResult<Tweet> {
        let account = store
            .get(address)?
            .ok_or(ProgramError::AccountNotFound(*address))?;
        Ok(decode_account(address, &account, &self.config.program_id)?)
    }

    /// Read a tweet as `txn` currently sees it.
    pub fn load(&self, txn: &Transaction<'_>, address: &Address) -> ProgramResult<Tweet> {
        Ok(txn.load_record(address, &self.config.program_id)?)
    }

    /// Write back a tweet whose counters were changed.
    pub(crate) fn save(
        &self,
        txn: &mut Transaction<'_>,
        address: &Address,
        tweet: &Tweet,
    ) -> ProgramResult<()> {
        Ok(txn.store_record(address, &self.config.program_id, tweet)?)
    }
}
