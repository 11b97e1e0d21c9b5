use crate::component::sort_key::SortMode;
use ferro_types::FeeRate;
use serde::{Deserialize, Serialize};

// Default ceiling for generated blocks, well under the consensus maximum.
const DEFAULT_MAX_GENERATED_BLOCK_SIZE: u64 = 2_000_000;
// Packages below this rate are never mined; 1000 satoshis per kilobyte.
const DEFAULT_MIN_FEE_RATE: FeeRate = FeeRate::from_sats_per_kb(1000);
// Give up when this many candidates in a row failed the budget test while
// the block is close to full; a heuristic to finish quickly on big pools.
const DEFAULT_MAX_CONSECUTIVE_FAILURES: usize = 1000;
const DEFAULT_NEAR_FULL_SLACK: u64 = 1000;

/// Block assembler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockAssemblerConfig {
    /// Ceiling for the serialized size of generated blocks. Clamped at
    /// assembly time to `[1000, consensus max − 1000]`.
    pub max_generated_block_size: u64,
    /// Packages whose fee rate falls below this floor end the selection
    /// loop.
    pub min_fee_rate: FeeRate,
    /// Which package metric ranks candidates.
    pub sort_mode: SortMode,
    /// Budget-failure streak that aborts selection when the block is
    /// nearly full.
    pub max_consecutive_failures: usize,
    /// How close to `max_generated_block_size` counts as nearly full, in
    /// bytes.
    pub near_full_slack: u64,
    /// Overrides the version-bits header version; test networks only.
    pub block_version_override: Option<i32>,
    /// Arbitrary data appended to the coinbase unlocking script.
    pub coinbase_message: Option<String>,
}

impl Default for BlockAssemblerConfig {
    fn default() -> Self {
        BlockAssemblerConfig {
            max_generated_block_size: DEFAULT_MAX_GENERATED_BLOCK_SIZE,
            min_fee_rate: DEFAULT_MIN_FEE_RATE,
            sort_mode: SortMode::FeeRate,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
            near_full_slack: DEFAULT_NEAR_FULL_SLACK,
            block_version_override: None,
            coinbase_message: None,
        }
    }
}
