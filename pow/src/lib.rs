//! Ferro proof-of-work interface.
//!
//! The assembler only needs the compact target for the next block;
//! retargeting math and header verification live behind [`PowEngine`].

use ferro_chain_spec::Consensus;
use ferro_types::IndexedHeader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod dummy;

pub use crate::dummy::DummyPowEngine;

/// Proof-of-work configuration.
#[derive(Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Debug)]
#[serde(tag = "func", content = "params")]
pub enum Pow {
    /// Minimum-difficulty engine for tests and local chains.
    Dummy,
    /// Fixed compact target.
    Constant { bits: u32 },
}

impl fmt::Display for Pow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pow::Dummy => write!(f, "Dummy"),
            Pow::Constant { bits } => write!(f, "Constant({bits:#010x})"),
        }
    }
}

impl Pow {
    pub fn engine(&self) -> Arc<dyn PowEngine> {
        match *self {
            Pow::Dummy => Arc::new(DummyPowEngine),
            Pow::Constant { bits } => Arc::new(ConstantPowEngine { bits }),
        }
    }

    pub fn is_dummy(&self) -> bool {
        *self == Pow::Dummy
    }
}

/// Difficulty oracle consumed by the block assembler.
pub trait PowEngine: Send + Sync {
    /// Compact difficulty target for the block following `prev`.
    fn next_work_required(&self, prev: Option<&IndexedHeader>, consensus: &Consensus) -> u32;
}

struct ConstantPowEngine {
    bits: u32,
}

impl PowEngine for ConstantPowEngine {
    fn next_work_required(&self, _prev: Option<&IndexedHeader>, _consensus: &Consensus) -> u32 {
        self.bits
    }
}
