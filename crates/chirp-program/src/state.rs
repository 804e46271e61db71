//! Record types stored in program-owned accounts.
//!
//! Sizes are fixed per type: variable-length fields are budgeted at their
//! maximum so a record never outgrows the account allocated for it.

use chirp_store::lifecycle::DISCRIMINATOR_LEN;
use chirp_store::AccountRecord;
use chirp_types::limits::{MAX_COMMENT_LEN, MAX_CONTENT_LEN, MAX_TOPIC_LEN};
use chirp_types::{Address, Identity};
use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

// bincode length prefix for strings.
const LEN_PREFIX: usize = 8;
const KEY_LEN: usize = 32;

/// A short post, unique per (author, topic).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub author: Identity,
    pub topic: String,
    pub content: String,
    pub likes: u64,
    pub dislikes: u64,
    pub salt: u8,
}

impl Tweet {
    /// Count a new reaction of `kind`.
    pub(crate) fn add_reaction(&mut self, kind: ReactionKind) -> ProgramResult<()> {
        match kind {
            ReactionKind::Like => {
                self.likes = self
                    .likes
                    .checked_add(1)
                    .ok_or(ProgramError::MaxLikesReached)?;
            }
            ReactionKind::Dislike => {
                self.dislikes = self
                    .dislikes
                    .checked_add(1)
                    .ok_or(ProgramError::MaxDislikesReached)?;
            }
        }
        Ok(())
    }

    /// Uncount a removed reaction of `kind`.
    pub(crate) fn remove_reaction(&mut self, kind: ReactionKind) -> ProgramResult<()> {
        match kind {
            ReactionKind::Like => {
                self.likes = self
                    .likes
                    .checked_sub(1)
                    .ok_or(ProgramError::MinLikesReached)?;
            }
            ReactionKind::Dislike => {
                self.dislikes = self
                    .dislikes
                    .checked_sub(1)
                    .ok_or(ProgramError::MinDislikesReached)?;
            }
        }
        Ok(())
    }
}

impl AccountRecord for Tweet {
    const NAME: &'static str = "Tweet";
    const SPACE: usize = DISCRIMINATOR_LEN
        + KEY_LEN
        + LEN_PREFIX
        + MAX_TOPIC_LEN
        + LEN_PREFIX
        + MAX_CONTENT_LEN
        + 8
        + 8
        + 1;
}

/// The two reaction kinds. A reaction's kind never changes; switching
/// requires removing the reaction and creating a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Dislike => write!(f, "dislike"),
        }
    }
}

/// A user's reaction to a tweet. At most one is live per (author, tweet).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub author: Identity,
    pub parent_tweet: Address,
    pub kind: ReactionKind,
    pub salt: u8,
}

impl AccountRecord for Reaction {
    const NAME: &'static str = "Reaction";
    // bincode encodes the enum tag as a u32.
    const SPACE: usize = DISCRIMINATOR_LEN + KEY_LEN + KEY_LEN + 4 + 1;
}

/// A comment on a tweet, unique per (author, content, tweet) while live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Identity,
    pub parent_tweet: Address,
    pub content: String,
    pub salt: u8,
}

impl AccountRecord for Comment {
    const NAME: &'static str = "Comment";
    const SPACE: usize =
        DISCRIMINATOR_LEN + KEY_LEN + KEY_LEN + LEN_PREFIX + MAX_COMMENT_LEN + 1;
}

/// Where a (reactor, tweet) pair sits in the reaction state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionState {
    Absent,
    Liked,
    Disliked,
}

impl From<Option<ReactionKind>> for ReactionState {
    fn from(kind: Option<ReactionKind>) -> Self {
        match kind {
            None => Self::Absent,
            Some(ReactionKind::Like) => Self::Liked,
            Some(ReactionKind::Dislike) => Self::Disliked,
        }
    }
}

/// Deposit returned to an author when their record is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reclaimed {
    pub address: Address,
    pub to: Identity,
    pub lamports: u64,
}
