use ferro_types::{Amount, BlockNumber, COIN};
use serde::{Deserialize, Serialize};

/// Consensus cap on a serialized block, in bytes.
pub const DEFAULT_MAX_BLOCK_SIZE: u64 = 8_000_000;

/// Signature-operation allowance per started megabyte of block size.
pub const MAX_BLOCK_SIGOPS_PER_MB: u64 = 20_000;

/// Blocks between subsidy halvings.
pub const SUBSIDY_HALVING_INTERVAL: BlockNumber = 210_000;

const BASE_SUBSIDY: Amount = Amount::from_sats(50 * COIN);

/// Chain-wide consensus parameters.
///
/// Only the parameters the assembly and validity paths consume live here;
/// proof-of-work retargeting reads `pow_limit_bits` through the pow
/// engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    /// Hard limit on serialized block size.
    pub max_block_size: u64,
    /// Blocks between halvings of the block subsidy.
    pub subsidy_halving_interval: BlockNumber,
    /// Subsidy of the first halving era.
    pub base_subsidy: Amount,
    /// Compact form of the minimum-difficulty target.
    pub pow_limit_bits: u32,
    /// When set, transaction locktimes are evaluated against the chain's
    /// median-time-past instead of the block header timestamp.
    pub median_time_past_locktime: bool,
}

impl Default for Consensus {
    fn default() -> Self {
        Consensus {
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            subsidy_halving_interval: SUBSIDY_HALVING_INTERVAL,
            base_subsidy: BASE_SUBSIDY,
            pow_limit_bits: 0x1d00_ffff,
            median_time_past_locktime: true,
        }
    }
}

impl Consensus {
    /// Signature-operation budget for a block of `block_size` bytes.
    pub fn max_block_sigops(&self, block_size: u64) -> u64 {
        (block_size.saturating_sub(1) / 1_000_000 + 1) * MAX_BLOCK_SIGOPS_PER_MB
    }

    /// Block subsidy at `height`, halving every
    /// `subsidy_halving_interval` blocks and vanishing after 64 halvings.
    pub fn block_subsidy(&self, height: BlockNumber) -> Amount {
        let halvings = height / self.subsidy_halving_interval;
        if halvings >= 64 {
            return Amount::zero();
        }
        Amount::from_sats(self.base_subsidy.as_sats() >> halvings)
    }
}
