use crate::amount::{Amount, COIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fee rate in satoshis per kilobyte of serialized transaction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeeRate(i64);

impl FeeRate {
    pub const fn from_sats_per_kb(sats_per_kb: i64) -> Self {
        FeeRate(sats_per_kb)
    }

    pub const fn zero() -> Self {
        FeeRate(0)
    }

    /// The rate implied by paying `fee` for `size` bytes. Truncating
    /// division; zero when the size is zero.
    pub fn from_fee_and_size(fee: Amount, size: u64) -> Self {
        if size == 0 {
            return FeeRate(0);
        }
        FeeRate(fee.as_sats().saturating_mul(1000) / size as i64)
    }

    /// The fee this rate charges for `size` bytes.
    ///
    /// A nonzero rate never quotes a zero fee for a nonzero size: when
    /// truncation would round to zero the result is +/-1 satoshi matching
    /// the rate's sign.
    pub fn fee(self, size: u64) -> Amount {
        let size = size as i64;
        let mut fee = self.0.saturating_mul(size) / 1000;
        if fee == 0 && size != 0 {
            if self.0 > 0 {
                fee = 1;
            } else if self.0 < 0 {
                fee = -1;
            }
        }
        Amount::from_sats(fee)
    }

    /// The fee for exactly one kilobyte.
    pub fn fee_per_kb(self) -> Amount {
        self.fee(1000)
    }

    pub const fn sats_per_kb(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:08} FER/kB", self.0 / COIN, (self.0 % COIN).abs())
    }
}
