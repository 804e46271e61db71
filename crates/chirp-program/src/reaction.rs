//! Likes and dislikes.
//!
//! Both kinds of reaction from one user to one tweet live at the same
//! derived address, so "already reacted" is simply "address occupied". That
//! single rule forbids liking twice, disliking twice, and flipping a like
//! into a dislike without removing it first:
//!
//! ```text
//!   Absent --like--> Liked --remove--> Absent
//!   Absent --dislike--> Disliked --remove--> Absent
//! ```
//!
//! Every transition moves the tweet's matching counter in the same
//! transaction as the reaction record itself.

use chirp_crypto::DerivedAddress;
use chirp_store::{decode_account, AccountStore, Transaction};
use chirp_types::{Address, Identity};
use tracing::debug;

use crate::address::AddressDeriver;
use crate::config::ProgramConfig;
use crate::error::{ProgramError, ProgramResult};
use crate::guard::AuthorizationGuard;
use crate::state::{Reaction, ReactionKind, ReactionState, Reclaimed};
use crate::tweet::TweetStore;

/// Owns reaction records and the tweet counters they drive.
pub struct ReactionLedger<'a> {
    config: &'a ProgramConfig,
    deriver: AddressDeriver,
    tweets: TweetStore<'a>,
}

impl<'a> ReactionLedger<'a> {
    pub fn new(config: &'a ProgramConfig) -> Self {
        Self {
            config,
            deriver: AddressDeriver::new(config.program_id),
            tweets: TweetStore::new(config),
        }
    }

    /// Record a like from `reactor` and bump the tweet's like counter.
    pub fn like(
        &self,
        txn: &mut Transaction<'_>,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<DerivedAddress> {
        self.react(txn, reactor, tweet, ReactionKind::Like)
    }

    /// Record a dislike from `reactor` and bump the tweet's dislike counter.
    pub fn dislike(
        &self,
        txn: &mut Transaction<'_>,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<DerivedAddress> {
        self.react(txn, reactor, tweet, ReactionKind::Dislike)
    }

    fn react(
        &self,
        txn: &mut Transaction<'_>,
        reactor: &Identity,
        tweet_address: &Address,
        kind: ReactionKind,
    ) -> ProgramResult<DerivedAddress> {
        let mut tweet = self.tweets.load(txn, tweet_address)?;
        let derived = self.deriver.reaction(reactor, tweet_address)?;

        let reaction = Reaction {
            author: *reactor,
            parent_tweet: *tweet_address,
            kind,
            salt: derived.salt,
        };
        txn.create_record(
            derived.address,
            &self.config.program_id,
            &reaction,
            &self.config.rent,
        )?;

        tweet.add_reaction(kind)?;
        self.tweets.save(txn, tweet_address, &tweet)?;

        debug!(
            reaction = %derived.address,
            tweet = %tweet_address,
            reactor = %reactor,
            %kind,
            likes = tweet.likes,
            dislikes = tweet.dislikes,
            "reaction added"
        );
        Ok(derived)
    }

    /// Destroy the reaction at `address` and uncount it from its tweet.
    ///
    /// Only the reaction's author may remove it.
    pub fn remove(
        &self,
        txn: &mut Transaction<'_>,
        reactor: &Identity,
        address: &Address,
    ) -> ProgramResult<Reclaimed> {
        let program_id = &self.config.program_id;
        let reaction: Reaction = txn.load_record(address, program_id)?;
        AuthorizationGuard::ensure_author(reactor, &reaction, address)?;
        self.deriver.verify_reaction(&reaction, address)?;

        let mut tweet = self.tweets.load(txn, &reaction.parent_tweet)?;
        tweet.remove_reaction(reaction.kind)?;
        self.tweets.save(txn, &reaction.parent_tweet, &tweet)?;

        let closed = txn.close_record::<Reaction>(address, program_id)?;

        debug!(
            reaction = %address,
            tweet = %reaction.parent_tweet,
            reactor = %reactor,
            kind = %reaction.kind,
            likes = tweet.likes,
            dislikes = tweet.dislikes,
            lamports = closed.lamports,
            "reaction removed"
        );
        Ok(Reclaimed {
            address: *address,
            to: *reactor,
            lamports: closed.lamports,
        })
    }

    /// Remove `reactor`'s own reaction to `tweet`.
    ///
    /// The address is derived from the caller, so a caller who never
    /// reacted finds nothing there.
    pub fn remove_for_tweet(
        &self,
        txn: &mut Transaction<'_>,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<Reclaimed> {
        let derived = self.deriver.reaction(reactor, tweet)?;
        self.remove(txn, reactor, &derived.address)
    }

    /// Read a committed reaction.
    pub fn fetch<S: AccountStore>(&self, store: &S, address: &Address) -> ProgramResult<Reaction> {
        let account = store
            .get(address)?
            .ok_or(ProgramError::AccountNotFound(*address))?;
        Ok(decode_account(address, &account, &self.config.program_id)?)
    }

    /// Where `reactor` currently stands on `tweet`.
    pub fn state<S: AccountStore>(
        &self,
        store: &S,
        reactor: &Identity,
        tweet: &Address,
    ) -> ProgramResult<ReactionState> {
        let derived = self.deriver.reaction(reactor, tweet)?;
        match self.fetch(store, &derived.address) {
            Ok(reaction) => Ok(ReactionState::from(Some(reaction.kind))),
            Err(ProgramError::AccountNotFound(_)) => Ok(ReactionState::Absent),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use chirp_store::InMemoryAccountStore;
    use proptest::prelude::*;

    use super::*;
    use crate::state::Tweet;

    struct Fixture {
        store: InMemoryAccountStore,
        config: ProgramConfig,
        tweet: Address,
    }

    impl Fixture {
        fn new() -> Self {
            let store = InMemoryAccountStore::new();
            let config = ProgramConfig::default();
            let author = Identity::from_bytes([0xaa; 32]);
            let tweet = store
                .transact(|txn| TweetStore::new(&config).initialize(txn, &author, "Hello", "Hi"))
                .unwrap()
                .address;
            Self {
                store,
                config,
                tweet,
            }
        }

        fn ledger(&self) -> ReactionLedger<'_> {
            ReactionLedger::new(&self.config)
        }

        fn like(&self, reactor: &Identity) -> ProgramResult<DerivedAddress> {
            self.store
                .transact(|txn| self.ledger().like(txn, reactor, &self.tweet))
        }

        fn dislike(&self, reactor: &Identity) -> ProgramResult<DerivedAddress> {
            self.store
                .transact(|txn| self.ledger().dislike(txn, reactor, &self.tweet))
        }

        fn remove(&self, reactor: &Identity, reaction: &Address) -> ProgramResult<Reclaimed> {
            self.store
                .transact(|txn| self.ledger().remove(txn, reactor, reaction))
        }

        fn tweet(&self) -> Tweet {
            TweetStore::new(&self.config)
                .fetch(&self.store, &self.tweet)
                .unwrap()
        }

        fn counters(&self) -> (u64, u64) {
            let t = self.tweet();
            (t.likes, t.dislikes)
        }

        fn state(&self, reactor: &Identity) -> ReactionState {
            self.ledger()
                .state(&self.store, reactor, &self.tweet)
                .unwrap()
        }
    }

    fn user(seed: u8) -> Identity {
        Identity::from_bytes([seed; 32])
    }

    // -----------------------------------------------------------------------
    // Adding
    // -----------------------------------------------------------------------

    #[test]
    fn like_creates_reaction_and_counts() {
        let f = Fixture::new();
        let derived = f.like(&user(1)).unwrap();
        assert_eq!(f.counters(), (1, 0));

        let reaction = f.ledger().fetch(&f.store, &derived.address).unwrap();
        assert_eq!(reaction.author, user(1));
        assert_eq!(reaction.parent_tweet, f.tweet);
        assert_eq!(reaction.kind, ReactionKind::Like);
        assert_eq!(reaction.salt, derived.salt);
    }

    #[test]
    fn dislike_creates_reaction_and_counts() {
        let f = Fixture::new();
        let derived = f.dislike(&user(1)).unwrap();
        assert_eq!(f.counters(), (0, 1));
        let reaction = f.ledger().fetch(&f.store, &derived.address).unwrap();
        assert_eq!(reaction.kind, ReactionKind::Dislike);
    }

    #[test]
    fn like_twice_is_already_in_use() {
        let f = Fixture::new();
        let derived = f.like(&user(1)).unwrap();
        assert_eq!(
            f.like(&user(1)).unwrap_err(),
            ProgramError::AlreadyInUse(derived.address)
        );
        assert_eq!(f.counters(), (1, 0));
    }

    #[test]
    fn dislike_while_liked_is_already_in_use() {
        let f = Fixture::new();
        f.like(&user(1)).unwrap();
        assert!(matches!(
            f.dislike(&user(1)),
            Err(ProgramError::AlreadyInUse(_))
        ));
        assert_eq!(f.counters(), (1, 0));
        assert_eq!(f.state(&user(1)), ReactionState::Liked);
    }

    #[test]
    fn like_while_disliked_is_already_in_use() {
        let f = Fixture::new();
        f.dislike(&user(1)).unwrap();
        assert!(matches!(f.like(&user(1)), Err(ProgramError::AlreadyInUse(_))));
        assert!(matches!(
            f.dislike(&user(1)),
            Err(ProgramError::AlreadyInUse(_))
        ));
        assert_eq!(f.counters(), (0, 1));
    }

    #[test]
    fn reacting_to_missing_tweet_is_account_not_found() {
        let f = Fixture::new();
        let ghost = Address::from_label("ghost tweet");
        let err = f
            .store
            .transact(|txn| f.ledger().like(txn, &user(1), &ghost))
            .unwrap_err();
        assert_eq!(err, ProgramError::AccountNotFound(ghost));
        assert_eq!(f.store.len().unwrap(), 1);
    }

    #[test]
    fn reacting_to_a_non_tweet_account_is_rejected() {
        let f = Fixture::new();
        let reaction = f.like(&user(1)).unwrap().address;
        let err = f
            .store
            .transact(|txn| f.ledger().like(txn, &user(2), &reaction))
            .unwrap_err();
        assert_eq!(
            err,
            ProgramError::AccountDiscriminatorMismatch {
                address: reaction,
                expected: "Tweet"
            }
        );
    }

    #[test]
    fn author_may_react_to_own_tweet() {
        let f = Fixture::new();
        f.like(&user(0xaa)).unwrap();
        assert_eq!(f.counters(), (1, 0));
    }

    #[test]
    fn counter_overflow_rolls_back_reaction() {
        let f = Fixture::new();
        f.store
            .transact(|txn| {
                let tweets = TweetStore::new(&f.config);
                let mut t = tweets.load(txn, &f.tweet)?;
                t.likes = u64::MAX;
                tweets.save(txn, &f.tweet, &t)
            })
            .unwrap();

        assert_eq!(f.like(&user(1)).unwrap_err(), ProgramError::MaxLikesReached);
        assert_eq!(f.state(&user(1)), ReactionState::Absent);
        assert_eq!(f.store.len().unwrap(), 1);
    }

    // -----------------------------------------------------------------------
    // Removing
    // -----------------------------------------------------------------------

    #[test]
    fn remove_uncounts_and_frees_address() {
        let f = Fixture::new();
        let derived = f.like(&user(1)).unwrap();
        let reclaimed = f.remove(&user(1), &derived.address).unwrap();

        assert_eq!(reclaimed.to, user(1));
        assert_eq!(reclaimed.address, derived.address);
        assert_eq!(
            reclaimed.lamports,
            f.config
                .rent
                .minimum_balance(<Reaction as chirp_store::AccountRecord>::SPACE)
                .unwrap()
        );
        assert_eq!(f.counters(), (0, 0));
        assert_eq!(
            f.ledger().fetch(&f.store, &derived.address).unwrap_err(),
            ProgramError::AccountNotFound(derived.address)
        );
    }

    #[test]
    fn remove_decrements_the_matching_counter() {
        let f = Fixture::new();
        f.like(&user(1)).unwrap();
        let d = f.dislike(&user(2)).unwrap();
        f.remove(&user(2), &d.address).unwrap();
        assert_eq!(f.counters(), (1, 0));
    }

    #[test]
    fn remove_then_react_again() {
        let f = Fixture::new();
        let derived = f.like(&user(1)).unwrap();
        f.remove(&user(1), &derived.address).unwrap();
        assert_eq!(f.state(&user(1)), ReactionState::Absent);

        let again = f.dislike(&user(1)).unwrap();
        assert_eq!(again, derived);
        assert_eq!(f.counters(), (0, 1));
        assert_eq!(f.state(&user(1)), ReactionState::Disliked);
    }

    #[test]
    fn remove_missing_is_account_not_found() {
        let f = Fixture::new();
        let address = f.ledger().deriver.reaction(&user(1), &f.tweet).unwrap().address;
        assert_eq!(
            f.remove(&user(1), &address).unwrap_err(),
            ProgramError::AccountNotFound(address)
        );
    }

    #[test]
    fn remove_by_non_author_is_unauthorized() {
        let f = Fixture::new();
        let derived = f.like(&user(1)).unwrap();
        assert_eq!(
            f.remove(&user(2), &derived.address).unwrap_err(),
            ProgramError::Unauthorized {
                actor: user(2),
                address: derived.address
            }
        );
        assert_eq!(f.counters(), (1, 0));
        assert_eq!(f.state(&user(1)), ReactionState::Liked);
    }

    #[test]
    fn remove_for_tweet_by_non_author_finds_nothing() {
        let f = Fixture::new();
        f.like(&user(1)).unwrap();
        let err = f
            .store
            .transact(|txn| f.ledger().remove_for_tweet(txn, &user(2), &f.tweet))
            .unwrap_err();
        assert!(matches!(err, ProgramError::AccountNotFound(_)));
        assert!(err.is_authorization_failure());
        assert_eq!(f.counters(), (1, 0));
    }

    #[test]
    fn remove_for_tweet_by_author_succeeds() {
        let f = Fixture::new();
        f.dislike(&user(1)).unwrap();
        f.store
            .transact(|txn| f.ledger().remove_for_tweet(txn, &user(1), &f.tweet))
            .unwrap();
        assert_eq!(f.counters(), (0, 0));
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn counters_track_distinct_reactors() {
        let f = Fixture::new();
        for seed in 1..=5 {
            f.like(&user(seed)).unwrap();
        }
        for seed in 6..=8 {
            f.dislike(&user(seed)).unwrap();
        }
        assert_eq!(f.counters(), (5, 3));
    }

    proptest! {
        #[test]
        fn counters_are_independent_of_arrival_order(kinds in proptest::collection::vec(any::<bool>(), 0..24)) {
            let f = Fixture::new();
            for (i, is_like) in kinds.iter().enumerate() {
                let reactor = user(i as u8 + 1);
                if *is_like {
                    f.like(&reactor).unwrap();
                } else {
                    f.dislike(&reactor).unwrap();
                }
            }
            let likes = kinds.iter().filter(|k| **k).count() as u64;
            let dislikes = kinds.len() as u64 - likes;
            prop_assert_eq!(f.counters(), (likes, dislikes));
        }

        #[test]
        fn at_most_one_reaction_per_pair(ops in proptest::collection::vec(0u8..3, 1..16)) {
            let f = Fixture::new();
            let reactor = user(7);
            let reaction = f.ledger().deriver.reaction(&reactor, &f.tweet).unwrap().address;
            for op in ops {
                let before = f.state(&reactor);
                let result = match op {
                    0 => f.like(&reactor).map(|_| ()),
                    1 => f.dislike(&reactor).map(|_| ()),
                    _ => f.remove(&reactor, &reaction).map(|_| ()),
                };
                let after = f.state(&reactor);
                match (before, op) {
                    (ReactionState::Absent, 0) => {
                        prop_assert_eq!(after, ReactionState::Liked);
                    }
                    (ReactionState::Absent, 1) => {
                        prop_assert_eq!(after, ReactionState::Disliked);
                    }
                    (ReactionState::Absent, _) => {
                        prop_assert!(result.is_err());
                    }
                    (_, 2) => {
                        prop_assert_eq!(after, ReactionState::Absent);
                    }
                    _ => {
                        prop_assert!(matches!(result, Err(ProgramError::AlreadyInUse(_))));
                        prop_assert_eq!(after, before);
                    }
                }
                let (likes, dislikes) = f.counters();
                prop_assert!(likes + dislikes <= 1);
                prop_assert_eq!(likes == 1, after == ReactionState::Liked);
                prop_assert_eq!(dislikes == 1, after == ReactionState::Disliked);
            }
        }
    }
}
