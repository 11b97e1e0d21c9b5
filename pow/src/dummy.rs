use crate::PowEngine;
use ferro_chain_spec::Consensus;
use ferro_types::IndexedHeader;

/// A pow engine that always asks for the minimum difficulty.
pub struct DummyPowEngine;

impl PowEngine for DummyPowEngine {
    fn next_work_required(&self, _prev: Option<&IndexedHeader>, consensus: &Consensus) -> u32 {
        consensus.pow_limit_bits
    }
}
