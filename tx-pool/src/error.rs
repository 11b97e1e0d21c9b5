use ferro_types::H256;
use thiserror::Error;

/// Rejection reasons for transactions submitted to the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Reject {
    /// The transaction is already in the pool.
    #[error("transaction {0} already exists in the pool")]
    Duplicated(H256),

    /// A declared parent is not in the pool.
    #[error("parent {0} is not in the pool")]
    Orphan(H256),
}
