use chirp_store::{AccountStore, InMemoryAccountStore};
use chirp_types::{Address, Identity};
use tracing::{debug, info};

use crate::address::AddressDeriver;
use crate::comment::CommentStore;
use crate::config::{ConfigError, ProgramConfig};
use crate::error::ProgramResult;
use crate::guard::AuthorizationGuard;
use crate::instruction::{Instruction, SignedTransaction};
use crate::reaction::ReactionLedger;
use crate::state::{Comment, Reaction, ReactionState, Reclaimed, Tweet};
use crate::tweet::TweetStore;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a processed instruction did to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A record was created at this address.
    Created(Address),
    /// A record was destroyed and its deposit returned.
    Closed(Reclaimed),
}

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// The program: every operation on tweets, reactions and comments.
///
/// Each mutating call is one `transact` on the injected store, so it either
/// applies in full or leaves the store untouched.
pub struct Program<S: AccountStore> {
    config: ProgramConfig,
    store: S,
}

impl Program<InMemoryAccountStore> {
    /// A program over a fresh in-memory store.
    pub fn in_memory(config: ProgramConfig) -> Result<Self, ConfigError> {
        Self::new(config, InMemoryAccountStore::new())
    }
}

impl<S: AccountStore> Program<S> {
    /// Create a program over `store` after validating `config`.
    pub fn new(config: ProgramConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(program_id = %config.program_id, "program started");
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Address derivation under this program's id.
    pub fn deriver(&self) -> AddressDeriver {
        AddressDeriver::new(self.config.program_id)
    }

    // -- tweets --------------------------------------------------------------

    pub fn initialize_tweet(
        &self,
        author: &Identity,
        topic: &str,
        content: &str,
    ) -> ProgramResult<Address> {
        let tweets = TweetStore::new(&self.config);
        let result = self
            .store
            .transact(|txn| tweets.initialize(txn, author, topic, content))
            .map(|derived| derived.address);
        rejected("initialize_tweet", author, result)
    }

    pub fn fetch_tweet(&self, address: &Address) -> ProgramResult<Tweet> {
        TweetStore::new(&self.config).fetch(&self.store, address)
    }

    // -- reactions -----------------------------------------------------------

    pub fn like_tweet(&self, reactor: &Identity, tweet: &Address) -> ProgramResult<Address> {
        let ledger = ReactionLedger::new(&self.config);
        let result = self
            .store
            .transact(|txn| ledger.like(txn, reactor, tweet))
            .map(|derived| derived.address);
        rejected("like_tweet", reactor, result)
    }

    pub fn dislike_tweet(&self, reactor: &Identity, tweet: &Address) -> ProgramResult<Address> {
        let ledger = ReactionLedger::new(&self.config);
        let result = self
            .store
            .transact(|txn| ledger.dislike(txn, reactor, tweet))
            .map(|derived| derived.address);
        rejected("dislike_tweet", reactor, result)
    }

    pub fn remove_reaction(
        &self,
        reactor: &Identity,
        reaction: &Address,
    ) -> ProgramResult<Reclaimed> {
        let ledger = ReactionLedger::new(&self.config);
        let result = self
            .store
            .transact(|txn| ledger.remove(txn, reactor, reaction));
        rejected("remove_reaction", reactor, result)
    }

    /// Remove `reactor`'s reaction to `tweet`, whichever kind it is.
    pub fn remove_reaction_for_tweet(
        &self,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<Reclaimed> {
        let ledger = ReactionLedger::new(&self.config);
        let result = self
            .store
            .transact(|txn| ledger.remove_for_tweet(txn, reactor, tweet));
        rejected("remove_reaction", reactor, result)
    }

    pub fn fetch_reaction(&self, address: &Address) -> ProgramResult<Reaction> {
        ReactionLedger::new(&self.config).fetch(&self.store, address)
    }

    pub fn reaction_state(
        &self,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<ReactionState> {
        ReactionLedger::new(&self.config).state(&self.store, reactor, tweet)
    }

    // -- comments ------------------------------------------------------------

    pub fn comment_tweet(
        &self,
        author: &Identity,
        tweet: &Address,
        content: &str,
    ) -> ProgramResult<Address> {
        let comments = CommentStore::new(&self.config);
        let result = self
            .store
            .transact(|txn| comments.add(txn, author, tweet, content))
            .map(|derived| derived.address);
        rejected("comment_tweet", author, result)
    }

    pub fn remove_comment(&self, author: &Identity, comment: &Address) -> ProgramResult<Reclaimed> {
        let comments = CommentStore::new(&self.config);
        let result = self
            .store
            .transact(|txn| comments.remove(txn, author, comment));
        rejected("remove_comment", author, result)
    }

    pub fn fetch_comment(&self, address: &Address) -> ProgramResult<Comment> {
        CommentStore::new(&self.config).fetch(&self.store, address)
    }

    // -- signed entry point --------------------------------------------------

    /// Verify `transaction`'s signature and run its instruction as the
    /// signer.
    pub fn process(&self, transaction: &SignedTransaction) -> ProgramResult<Outcome> {
        let signer = &transaction.signer;
        let name = transaction.instruction.name();
        rejected(name, signer, AuthorizationGuard::ensure_signed(transaction))?;

        match &transaction.instruction {
            Instruction::InitializeTweet { topic, content } => self
                .initialize_tweet(signer, topic, content)
                .map(Outcome::Created),
            Instruction::LikeTweet { tweet } => self.like_tweet(signer, tweet).map(Outcome::Created),
            Instruction::DislikeTweet { tweet } => {
                self.dislike_tweet(signer, tweet).map(Outcome::Created)
            }
            Instruction::RemoveReaction { reaction } => {
                self.remove_reaction(signer, reaction).map(Outcome::Closed)
            }
            Instruction::CommentTweet { tweet, content } => self
                .comment_tweet(signer, tweet, content)
                .map(Outcome::Created),
            Instruction::RemoveComment { comment } => {
                self.remove_comment(signer, comment).map(Outcome::Closed)
            }
        }
    }
}

fn rejected<T>(operation: &str, actor: &Identity, result: ProgramResult<T>) -> ProgramResult<T> {
    if let Err(err) = &result {
        debug!(operation, actor = %actor, error = %err, "operation rejected");
    }
    result
}
