//! Ferro block and transaction verification.
//!
//! The checks the block assembler invokes: contextual transaction
//! finality during selection, and a validity pass over the assembled
//! block before a template is returned. Script execution and signature
//! checking are separate concerns and do not live here.

mod error;

pub use error::{BlockError, TransactionError};

use ferro_chain_spec::Consensus;
use ferro_types::{merkle_root, Block, BlockNumber, Transaction};
use std::collections::HashSet;

/// Verifies a transaction against the context of the block that would
/// include it: target height and locktime cutoff.
pub struct ContextualTransactionVerifier<'a> {
    transaction: &'a Transaction,
    height: BlockNumber,
    lock_time_cutoff: u32,
}

impl<'a> ContextualTransactionVerifier<'a> {
    pub fn new(
        transaction: &'a Transaction,
        height: BlockNumber,
        lock_time_cutoff: u32,
    ) -> Self {
        ContextualTransactionVerifier {
            transaction,
            height,
            lock_time_cutoff,
        }
    }

    pub fn verify(&self) -> Result<(), TransactionError> {
        if self.transaction.is_final(self.height, self.lock_time_cutoff) {
            Ok(())
        } else {
            Err(TransactionError::NotFinal {
                txid: self.transaction.hash(),
                height: self.height,
            })
        }
    }
}

/// Structural and contextual validity of an assembled block.
///
/// The assembler runs this with `check_merkle_root` disabled, the same
/// configuration the reference template validity check uses: the merkle
/// root changes with the miner's extranonce, the rest must already hold.
pub struct BlockVerifier<'a> {
    consensus: &'a Consensus,
}

impl<'a> BlockVerifier<'a> {
    pub fn new(consensus: &'a Consensus) -> Self {
        BlockVerifier { consensus }
    }

    pub fn verify(
        &self,
        block: &Block,
        height: BlockNumber,
        lock_time_cutoff: u32,
        check_merkle_root: bool,
    ) -> Result<(), BlockError> {
        if block.transactions.is_empty() {
            return Err(BlockError::Empty);
        }
        if !block.transactions[0].is_coinbase() {
            return Err(BlockError::MissingCoinbase);
        }
        for (index, tx) in block.transactions.iter().enumerate().skip(1) {
            if tx.is_coinbase() {
                return Err(BlockError::UnexpectedCoinbase(index));
            }
        }

        let size = block.serialized_size() as u64;
        if size > self.consensus.max_block_size {
            return Err(BlockError::ExceededMaximumBlockSize {
                actual: size,
                limit: self.consensus.max_block_size,
            });
        }

        let sigops: u64 = block.transactions.iter().map(Transaction::sig_op_count).sum();
        let sigops_limit = self.consensus.max_block_sigops(size);
        if sigops > sigops_limit {
            return Err(BlockError::ExceededMaximumSigOps {
                actual: sigops,
                limit: sigops_limit,
            });
        }

        let mut seen = HashSet::with_capacity(block.transactions.len());
        for tx in &block.transactions {
            if !seen.insert(tx.hash()) {
                return Err(BlockError::DuplicateTransaction(tx.hash()));
            }
        }

        for (index, tx) in block.transactions.iter().enumerate().skip(1) {
            ContextualTransactionVerifier::new(tx, height, lock_time_cutoff)
                .verify()
                .map_err(|error| BlockError::Transactions { index, error })?;
        }

        if check_merkle_root {
            let hashes: Vec<_> = block.transactions.iter().map(Transaction::hash).collect();
            if merkle_root(&hashes) != block.header.merkle_root {
                return Err(BlockError::TransactionsRoot);
            }
        }

        Ok(())
    }
}
