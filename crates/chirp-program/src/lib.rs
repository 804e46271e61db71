//! The Chirp program: tweets, reactions, and comments stored as records in
//! program-owned accounts.
//!
//! Nothing here allocates storage keys. Every record lives at an address
//! derived from the fields that make it unique, so the uniqueness rules are
//! enforced by the store's "create fails if occupied" primitive:
//!
//! - one tweet per (author, topic)
//! - one reaction per (reactor, tweet), whichever kind it is
//! - one live comment per (author, content, tweet)
//!
//! Mutations run in a single [`AccountStore::transact`] call, so a reaction
//! and the counter it moves are written together or not at all.
//!
//! # Example
//!
//! ```
//! use chirp_program::{Program, ProgramConfig, ReactionState};
//! use chirp_types::Identity;
//!
//! let program = Program::in_memory(ProgramConfig::default()).unwrap();
//! let alice = Identity::from_bytes([1; 32]);
//! let bob = Identity::from_bytes([2; 32]);
//!
//! let tweet = program.initialize_tweet(&alice, "Hello", "Hi").unwrap();
//! program.like_tweet(&bob, &tweet).unwrap();
//!
//! assert_eq!(program.fetch_tweet(&tweet).unwrap().likes, 1);
//! assert_eq!(program.reaction_state(&bob, &tweet).unwrap(), ReactionState::Liked);
//! ```
//!
//! [`AccountStore::transact`]: chirp_store::AccountStore::transact

pub mod address;
pub mod comment;
pub mod config;
pub mod error;
pub mod guard;
pub mod instruction;
pub mod program;
pub mod reaction;
pub mod state;
pub mod tweet;

pub use address::{AddressDeriver, COMMENT_SEED, TWEET_REACTION_SEED, TWEET_SEED};
pub use comment::CommentStore;
pub use config::{ConfigError, ProgramConfig};
pub use error::{ProgramError, ProgramResult};
pub use guard::{Authored, AuthorizationGuard};
pub use instruction::{Instruction, SignedTransaction};
pub use program::{Outcome, Program};
pub use reaction::ReactionLedger;
pub use state::{Comment, Reaction, ReactionKind, ReactionState, Reclaimed, Tweet};
pub use tweet::TweetStore;
