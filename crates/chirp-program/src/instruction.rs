//! Signed requests to the program.
//!
//! An [`Instruction`] names one operation and its arguments. The acting
//! identity is never part of the instruction: it is the signer of the
//! [`SignedTransaction`] that carries it.

use chirp_crypto::{ContentHasher, Signature, SigningKey, VerifyingKey};
use chirp_types::{Address, Identity};
use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

/// One program operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    InitializeTweet { topic: String, content: String },
    LikeTweet { tweet: Address },
    DislikeTweet { tweet: Address },
    RemoveReaction { reaction: Address },
    CommentTweet { tweet: Address, content: String },
    RemoveComment { comment: Address },
}

impl Instruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeTweet { .. } => "initialize_tweet",
            Self::LikeTweet { .. } => "like_tweet",
            Self::DislikeTweet { .. } => "dislike_tweet",
            Self::RemoveReaction { .. } => "remove_reaction",
            Self::CommentTweet { .. } => "comment_tweet",
            Self::RemoveComment { .. } => "remove_comment",
        }
    }
}

/// An instruction with the signature of the identity it acts as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub signer: Identity,
    pub instruction: Instruction,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Sign `instruction` as the identity of `key`.
    pub fn sign(key: &SigningKey, instruction: Instruction) -> ProgramResult<Self> {
        let signer = key.identity();
        let message = Self::message(&signer, &instruction)?;
        Ok(Self {
            signer,
            signature: key.sign(&message),
            instruction,
        })
    }

    /// Bytes covered by the signature: the digest of the bincode encoding
    /// of `(signer, instruction)`.
    pub fn message(signer: &Identity, instruction: &Instruction) -> ProgramResult<[u8; 32]> {
        let encoded = bincode::serialize(&(signer, instruction))
            .map_err(|e| ProgramError::Serialization(e.to_string()))?;
        Ok(ContentHasher::TRANSACTION.digest(&encoded))
    }

    /// Check that `signature` was produced by `signer` over this
    /// instruction.
    pub fn verify(&self) -> ProgramResult<()> {
        let missing = || ProgramError::MissingRequiredSignature(self.signer);
        let key = VerifyingKey::from_identity(&self.signer).map_err(|_| missing())?;
        let message = Self::message(&self.signer, &self.instruction)?;
        key.verify(&message, &self.signature).map_err(|_| missing())
    }
}
