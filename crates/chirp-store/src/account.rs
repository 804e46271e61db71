use chirp_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Bytes charged for every account on top of its data.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// A single storage slot: owning program, rent deposit, and raw data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Program allowed to interpret and mutate the data.
    pub owner: Address,
    /// Deposit held while the account exists; returned on close.
    pub lamports: u64,
    /// Fixed-size record bytes.
    pub data: Vec<u8>,
}

impl Account {
    pub fn new(owner: Address, lamports: u64, data: Vec<u8>) -> Self {
        Self {
            owner,
            lamports,
            data,
        }
    }
}

/// Storage rent schedule. An account funded with [`Rent::minimum_balance`]
/// is exempt from further charges for as long as it lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rent {
    pub lamports_per_byte_year: u64,
    pub exemption_threshold: f64,
}

impl Rent {
    /// Deposit required to keep `data_len` bytes alive indefinitely.
    ///
    /// Fails with [`StoreError::RentOverflow`] when the deposit does not fit
    /// in a `u64`.
    pub fn minimum_balance(&self, data_len: usize) -> StoreResult<u64> {
        let overflow = || StoreError::RentOverflow { data_len };
        let bytes = u64::try_from(data_len)
            .ok()
            .and_then(|len| len.checked_add(ACCOUNT_STORAGE_OVERHEAD))
            .ok_or_else(overflow)?;
        let per_year = bytes
            .checked_mul(self.lamports_per_byte_year)
            .ok_or_else(overflow)?;
        let deposit = per_year as f64 * self.exemption_threshold;
        // `as` saturates, so out-of-range values must be caught first.
        if !deposit.is_finite() || deposit < 0.0 || deposit >= u64::MAX as f64 {
            return Err(overflow());
        }
        Ok(deposit as u64)
    }
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold: 2.0,
        }
    }
}
