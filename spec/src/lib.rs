//! Ferro consensus parameters.

mod consensus;

pub use consensus::{
    Consensus, DEFAULT_MAX_BLOCK_SIZE, MAX_BLOCK_SIGOPS_PER_MB, SUBSIDY_HALVING_INTERVAL,
};
