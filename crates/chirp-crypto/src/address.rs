//! Seed-based address derivation.
//!
//! An address is the BLAKE3 hash of a list of seeds, a one-byte salt, the
//! owning program's id, and a fixed marker. Only hashes that are *not*
//! valid ed25519 points are accepted, so no private key can ever sign for a
//! derived address. The salt is searched from 255 downward and the first
//! accepted value is returned together with the address.

use chirp_types::limits::{MAX_SEEDS, MAX_SEED_LEN};
use chirp_types::Address;

/// Marker appended to every derivation hash.
pub const DERIVATION_MARKER: &[u8] = b"ProgramDerivedAddress";

/// An address together with the salt that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Address,
    pub salt: u8,
}

/// Errors from address derivation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DeriveError {
    #[error("seed {index} is {len} bytes; the limit is {MAX_SEED_LEN}")]
    SeedTooLong { index: usize, len: usize },

    #[error("{0} seeds supplied; the limit is {MAX_SEEDS}")]
    TooManySeeds(usize),

    #[error("derived hash is a valid curve point")]
    OnCurve,

    #[error("no salt yields an off-curve address")]
    NoViableSalt,
}

/// Returns `true` if `bytes` decompress to a point on the ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    ed25519_dalek::VerifyingKey::from_bytes(bytes).is_ok()
}

/// Compute the address for an exact seed list (salt already included).
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<Address, DeriveError> {
    check_seeds(seeds, 0)?;

    let mut hasher = blake3::Hasher::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(DERIVATION_MARKER);
    let hash = *hasher.finalize().as_bytes();

    if is_on_curve(&hash) {
        return Err(DeriveError::OnCurve);
    }
    Ok(Address::from_bytes(hash))
}

/// Find the canonical (highest-salt) address for `seeds`.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<DerivedAddress, DeriveError> {
    check_seeds(seeds, 1)?;

    for salt in (0..=u8::MAX).rev() {
        let salt_seed = [salt];
        let mut with_salt: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_salt.extend_from_slice(seeds);
        with_salt.push(&salt_seed);

        match create_program_address(&with_salt, program_id) {
            Ok(address) => return Ok(DerivedAddress { address, salt }),
            Err(DeriveError::OnCurve) => continue,
            Err(other) => return Err(other),
        }
    }
    Err(DeriveError::NoViableSalt)
}

fn check_seeds(seeds: &[&[u8]], reserved: usize) -> Result<(), DeriveError> {
    if seeds.len() + reserved > MAX_SEEDS {
        return Err(DeriveError::TooManySeeds(seeds.len() + reserved));
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(DeriveError::SeedTooLong {
                index,
                len: seed.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn program() -> Address {
        Address::from_label("chirp-test-program")
    }

    #[test]
    fn find_is_deterministic() {
        let seeds: &[&[u8]] = &[b"TWEET_SEED", b"hello"];
        let a = find_program_address(seeds, &program()).unwrap();
        let b = find_program_address(seeds, &program()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn found_address_is_off_curve() {
        let derived = find_program_address(&[b"off-curve"], &program()).unwrap();
        assert!(!is_on_curve(derived.address.as_bytes()));
    }

    #[test]
    fn create_with_found_salt_reproduces_address() {
        let seeds: &[&[u8]] = &[b"COMMENT_SEED", &[7u8; 32]];
        let derived = find_program_address(seeds, &program()).unwrap();
        let salt = [derived.salt];
        let recreated =
            create_program_address(&[seeds[0], seeds[1], &salt], &program()).unwrap();
        assert_eq!(recreated, derived.address);
    }

    #[test]
    fn program_id_separates_namespaces() {
        let seeds: &[&[u8]] = &[b"same"];
        let a = find_program_address(seeds, &Address::from_label("a")).unwrap();
        let b = find_program_address(seeds, &Address::from_label("b")).unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn seed_at_limit_is_accepted() {
        let seed = [b'A'; MAX_SEED_LEN];
        assert!(find_program_address(&[&seed], &program()).is_ok());
    }

    #[test]
    fn oversized_seed_is_rejected() {
        let seed = [b'A'; MAX_SEED_LEN + 1];
        let err = find_program_address(&[b"tag", &seed], &program()).unwrap_err();
        assert_eq!(
            err,
            DeriveError::SeedTooLong {
                index: 1,
                len: MAX_SEED_LEN + 1
            }
        );
    }

    #[test]
    fn too_many_seeds_is_rejected() {
        let seeds: Vec<&[u8]> = vec![&b"x"[..]; MAX_SEEDS];
        // One slot is reserved for the salt.
        assert_eq!(
            find_program_address(&seeds, &program()).unwrap_err(),
            DeriveError::TooManySeeds(MAX_SEEDS + 1)
        );
        assert!(find_program_address(&seeds[..MAX_SEEDS - 1], &program()).is_ok());
    }

    #[test]
    fn different_salts_yield_different_addresses() {
        let d = find_program_address(&[b"ab"], &program()).unwrap();
        let other_salt = [d.salt.wrapping_sub(1)];
        if let Ok(other) = create_program_address(&[b"ab", &other_salt], &program()) {
            assert_ne!(other, d.address);
        }
    }

    proptest! {
        #[test]
        fn derivation_is_pure(seed in proptest::collection::vec(any::<u8>(), 0..=MAX_SEED_LEN)) {
            let a = find_program_address(&[b"prop", &seed[..]], &program()).unwrap();
            let b = find_program_address(&[b"prop", &seed[..]], &program()).unwrap();
            prop_assert_eq!(a, b);
            prop_assert!(!is_on_curve(a.address.as_bytes()));
        }
    }
}
