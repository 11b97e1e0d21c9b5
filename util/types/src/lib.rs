//! Ferro core value types.
//!
//! Plain structs for the chain's primitives: hashes, amounts, fee rates,
//! scripts, transactions, headers and blocks, plus the canonical
//! serialization they hash over. Wire protocol framing lives elsewhere;
//! serialization here exists to define serialized sizes and identifiers.

mod amount;
mod block;
mod encode;
mod fee_rate;
mod hash;
mod header;
mod merkle;
mod script;
mod transaction;

pub use amount::{Amount, COIN, MAX_MONEY};
pub use block::Block;
pub use fee_rate::FeeRate;
pub use hash::H256;
pub use header::{Header, IndexedHeader};
pub use merkle::merkle_root;
pub use script::{opcodes, Script};
pub use transaction::{
    OutPoint, Transaction, TxIn, TxOut, LOCKTIME_THRESHOLD, SEQUENCE_FINAL,
};

/// Block height. Genesis is 0.
pub type BlockNumber = u32;
