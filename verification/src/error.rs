use ferro_types::{BlockNumber, H256};
use thiserror::Error;

/// Contextual transaction verification failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The transaction's locktime has not matured for the target block.
    #[error("transaction {txid} is not final at height {height}")]
    NotFinal { txid: H256, height: BlockNumber },
}

/// Assembled-block verification failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("block has no transactions")]
    Empty,

    #[error("first transaction is not a coinbase")]
    MissingCoinbase,

    #[error("transaction at index {0} is an unexpected coinbase")]
    UnexpectedCoinbase(usize),

    #[error("block size {actual} exceeds maximum {limit}")]
    ExceededMaximumBlockSize { actual: u64, limit: u64 },

    #[error("block sigops {actual} exceeds maximum {limit}")]
    ExceededMaximumSigOps { actual: u64, limit: u64 },

    #[error("duplicate transaction {0}")]
    DuplicateTransaction(H256),

    #[error("transactions merkle root does not match header")]
    TransactionsRoot,

    #[error("transaction at index {index}: {error}")]
    Transactions {
        index: usize,
        error: TransactionError,
    },
}
