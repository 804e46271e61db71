//! Byte limits shared by address derivation and record layouts.

/// Maximum length of a single address seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds (including the salt) in one derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum tweet topic length. The topic is used verbatim as an address
/// seed, so it shares the seed bound.
pub const MAX_TOPIC_LEN: usize = MAX_SEED_LEN;

/// Maximum tweet content length.
pub const MAX_CONTENT_LEN: usize = 500;

/// Maximum comment content length.
pub const MAX_COMMENT_LEN: usize = 500;
