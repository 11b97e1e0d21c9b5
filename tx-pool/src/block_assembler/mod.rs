//! Block template assembly.
//!
//! Greedy package selection over the pool: candidates are ranked by a
//! package metric, the top package's full unconfirmed ancestor closure is
//! committed ancestors first, and the remaining descendants' package
//! totals are rebuilt so the ranking stays truthful as the block fills.

#[cfg(test)]
mod tests;

use crate::component::candidates::CandidateEntries;
use crate::component::entry::TxEntry;
use crate::component::sort_key::{ByPackageFee, ByPackageFeeRate, SortMode, SortStrategy};
use crate::config::BlockAssemblerConfig;
use crate::pool::TxPool;
use ferro_chain_spec::Consensus;
use ferro_logger::{debug, info};
use ferro_pow::PowEngine;
use ferro_traits::ChainProvider;
use ferro_types::{
    merkle_root, opcodes, Amount, Block, BlockNumber, Header, OutPoint, Script, Transaction,
    TxIn, TxOut, H256, SEQUENCE_FINAL,
};
use ferro_util::{LinkedHashMap, RwLock};
use ferro_verification::{BlockVerifier, ContextualTransactionVerifier};
use std::collections::HashSet;
use std::time::Instant;

/// Serialized bytes reserved for the coinbase transaction before any pool
/// transaction is considered.
const COINBASE_SIZE_RESERVATION: u64 = 1000;
/// Signature operations reserved for the coinbase transaction.
const COINBASE_SIGOPS_RESERVATION: u64 = 100;

/// A block ready for proof-of-work, with per-transaction metadata miners
/// use to rebuild the coinbase.
pub struct BlockTemplate {
    pub block: Block,
    /// Fee per transaction, index-aligned with `block.transactions`. The
    /// coinbase slot holds the negated total of the rest.
    pub tx_fees: Vec<Amount>,
    /// Signature operations per transaction, index-aligned with
    /// `block.transactions`.
    pub tx_sig_ops: Vec<u64>,
    pub stats: TemplateStats,
}

/// Counters from one assembly pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TemplateStats {
    /// Selected pool transactions, excluding the coinbase.
    pub tx_count: usize,
    /// Accounted block size including the coinbase reservation.
    pub block_size: u64,
    /// Accounted signature operations including the coinbase reservation.
    pub block_sigops: u64,
    /// Candidate entries whose package totals were rebuilt after an
    /// ancestor was committed.
    pub descendants_updated: usize,
}

/// Assembles block templates from the pool.
///
/// One assembler can be reused across passes; all per-pass state is reset
/// at the start of [`create_new_block`].
///
/// [`create_new_block`]: BlockAssembler::create_new_block
pub struct BlockAssembler {
    consensus: Consensus,
    config: BlockAssemblerConfig,
    max_generated_block_size: u64,
    height: BlockNumber,
    lock_time_cutoff: u32,
    in_block: HashSet<H256>,
    entries: Vec<TxEntry>,
    block_size: u64,
    block_sigops: u64,
    fees: Amount,
}

impl BlockAssembler {
    pub fn new(consensus: Consensus, config: BlockAssemblerConfig) -> Self {
        // Leave room for the consensus rules' own slack above the target,
        // and never generate below the coinbase reservation. The floor is
        // applied last so it wins over a tiny consensus limit.
        let ceiling = consensus.max_block_size.saturating_sub(1000);
        let max_generated_block_size = config
            .max_generated_block_size
            .min(ceiling)
            .max(COINBASE_SIZE_RESERVATION);
        BlockAssembler {
            consensus,
            config,
            max_generated_block_size,
            height: 0,
            lock_time_cutoff: 0,
            in_block: HashSet::new(),
            entries: Vec::new(),
            block_size: COINBASE_SIZE_RESERVATION,
            block_sigops: COINBASE_SIGOPS_RESERVATION,
            fees: Amount::zero(),
        }
    }

    fn reset(&mut self) {
        self.height = 0;
        self.lock_time_cutoff = 0;
        self.in_block.clear();
        self.entries.clear();
        self.block_size = COINBASE_SIZE_RESERVATION;
        self.block_sigops = COINBASE_SIGOPS_RESERVATION;
        self.fees = Amount::zero();
    }

    /// Whether a package of the given weight still fits the block's size
    /// and sigop budgets.
    fn test_package(&self, package_size: u64, package_sig_ops: u64) -> bool {
        let size_with_package = self.block_size + package_size;
        if size_with_package >= self.max_generated_block_size {
            return false;
        }
        let sigops_limit = self.consensus.max_block_sigops(size_with_package);
        self.block_sigops + package_sig_ops < sigops_limit
    }

    /// Per-member checks over a package: every transaction must be final
    /// in the target block, and the running size must stay under the
    /// ceiling at each member.
    fn test_package_transactions(&self, package: &[&TxEntry]) -> bool {
        let mut potential_size = self.block_size;
        for member in package {
            let verifier = ContextualTransactionVerifier::new(
                &member.transaction,
                self.height,
                self.lock_time_cutoff,
            );
            if verifier.verify().is_err() {
                return false;
            }
            potential_size += member.size;
            if potential_size >= self.max_generated_block_size {
                return false;
            }
        }
        true
    }

    fn add_to_block(&mut self, entry: &TxEntry) {
        self.block_size += entry.size;
        self.block_sigops += entry.sig_op_count;
        self.fees += entry.fee;
        self.in_block.insert(entry.txid());
        self.entries.push(entry.clone());
    }

    /// Rebuilds the package totals of every remaining candidate that
    /// descends from a just-committed entry, subtracting each committed
    /// entry's own weight exactly once. Returns how many candidates were
    /// updated.
    fn update_packages_for_added<S: SortStrategy>(
        pool: &TxPool,
        added: &LinkedHashMap<H256, TxEntry>,
        candidates: &mut CandidateEntries<S>,
    ) -> usize {
        let mut updated = 0;
        for (txid, entry) in added.iter() {
            for descendant_id in pool.calc_descendants(txid) {
                if added.contains_key(&descendant_id) {
                    continue;
                }
                // Reinsert so the sorted index sees the new totals.
                if let Some(mut descendant) = candidates.remove(&descendant_id) {
                    descendant.sub_entry_weight(entry);
                    candidates.insert(descendant);
                    updated += 1;
                }
            }
        }
        updated
    }

    /// The selection loop. Returns the descendant update count for the
    /// pass statistics.
    fn add_package_txs<S: SortStrategy>(&mut self, pool: &TxPool) -> usize {
        let mut candidates: CandidateEntries<S> = pool.entries().cloned().collect();
        let mut failed: HashSet<H256> = HashSet::new();
        let mut consecutive_failures = 0;
        let mut descendants_updated = 0;

        while let Some(candidate) = candidates.pop_max() {
            let txid = candidate.txid();
            if self.in_block.contains(&txid) || failed.contains(&txid) {
                continue;
            }

            // Extraction order is non-increasing in the floor metric, so
            // the first package under the floor ends the pass.
            if !S::reaches_floor(
                candidate.ancestors_fee,
                candidate.ancestors_size,
                self.config.min_fee_rate,
            ) {
                debug!("package below fee floor, ending selection at {}", txid);
                break;
            }

            if !self.test_package(candidate.ancestors_size, candidate.ancestors_sig_ops) {
                failed.insert(txid);
                consecutive_failures += 1;
                if consecutive_failures > self.config.max_consecutive_failures
                    && self.block_size
                        > self
                            .max_generated_block_size
                            .saturating_sub(self.config.near_full_slack)
                {
                    debug!(
                        "{} consecutive budget failures on a nearly full block, giving up",
                        consecutive_failures
                    );
                    break;
                }
                continue;
            }

            // The package is the candidate plus its uncommitted ancestor
            // closure, ordered parents before children. Pool entries keep
            // their original ancestor counts, which stay a consistent
            // topological key even after candidates' totals shrink.
            let mut package: Vec<&TxEntry> = pool
                .calc_ancestors(&txid)
                .into_iter()
                .filter(|id| !self.in_block.contains(id))
                .map(|id| pool.get(&id).expect("pool ancestors resolve to entries"))
                .collect();
            package.push(pool.get(&txid).expect("candidates come from the pool"));
            package.sort_unstable_by_key(|member| member.ancestors_count);

            // A closure that fails here is dropped without marking the
            // candidate failed; it can become feasible once more of its
            // ancestors are committed.
            if !self.test_package_transactions(&package) {
                continue;
            }

            consecutive_failures = 0;
            let mut added: LinkedHashMap<H256, TxEntry> = LinkedHashMap::new();
            for member in package {
                candidates.remove(&member.txid());
                self.add_to_block(member);
                added.insert(member.txid(), member.clone());
            }
            descendants_updated +=
                Self::update_packages_for_added::<S>(pool, &added, &mut candidates);
        }
        descendants_updated
    }

    fn build_coinbase(&self, subsidy: Amount) -> Transaction {
        let mut script_sig = Script::new();
        script_sig.push_int(i64::from(self.height));
        script_sig.push_opcode(opcodes::OP_0);
        if let Some(message) = &self.config.coinbase_message {
            script_sig.push_slice(message.as_bytes());
        }
        let mut script_pubkey = Script::new();
        script_pubkey.push_opcode(opcodes::OP_1);
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TxOut::new(self.fees + subsidy, script_pubkey)],
            lock_time: 0,
        }
    }

    /// Assembles a new block template on top of the current chain tip.
    ///
    /// # Panics
    ///
    /// Panics if the assembled block fails its own validity check; a
    /// template that would be rejected by the chain means the selection
    /// accounting is broken and mining on it would waste work.
    pub fn create_new_block<C: ChainProvider>(
        &mut self,
        pool: &RwLock<TxPool>,
        chain: &C,
        pow: &dyn PowEngine,
    ) -> BlockTemplate {
        let instant = Instant::now();
        self.reset();

        let tip = chain.tip();
        self.height = tip.as_ref().map(|tip| tip.height + 1).unwrap_or(0);
        let median_time_past = tip
            .as_ref()
            .map(|tip| chain.median_time_past(tip))
            .unwrap_or(0);
        let time = std::cmp::max(chain.adjusted_time(), median_time_past.saturating_add(1));
        self.lock_time_cutoff = if self.consensus.median_time_past_locktime {
            median_time_past
        } else {
            time
        };

        let descendants_updated = {
            let pool = pool.read();
            match self.config.sort_mode {
                SortMode::Fee => self.add_package_txs::<ByPackageFee>(&pool),
                SortMode::FeeRate => self.add_package_txs::<ByPackageFeeRate>(&pool),
            }
        };

        let subsidy = self.consensus.block_subsidy(self.height);
        let coinbase = self.build_coinbase(subsidy);
        let coinbase_sig_ops = coinbase.sig_op_count();

        let mut transactions = Vec::with_capacity(self.entries.len() + 1);
        let mut tx_fees = Vec::with_capacity(self.entries.len() + 1);
        let mut tx_sig_ops = Vec::with_capacity(self.entries.len() + 1);
        transactions.push(coinbase);
        tx_fees.push(-self.fees);
        tx_sig_ops.push(coinbase_sig_ops);
        for entry in self.entries.drain(..) {
            tx_fees.push(entry.fee);
            tx_sig_ops.push(entry.sig_op_count);
            transactions.push(entry.transaction);
        }

        let txids: Vec<H256> = transactions.iter().map(Transaction::hash).collect();
        let version = self
            .config
            .block_version_override
            .unwrap_or_else(|| chain.block_version(tip.as_ref()));
        let header = Header {
            version,
            prev_hash: tip.as_ref().map(|tip| tip.hash).unwrap_or_else(H256::zero),
            merkle_root: merkle_root(&txids),
            time,
            bits: pow.next_work_required(tip.as_ref(), &self.consensus),
            nonce: 0,
        };
        let block = Block::new(header, transactions);

        // The miner's extranonce changes the merkle root, so it is not
        // checked here; everything else must already hold.
        if let Err(error) = BlockVerifier::new(&self.consensus).verify(
            &block,
            self.height,
            self.lock_time_cutoff,
            false,
        ) {
            panic!("generated an invalid block template: {error}");
        }

        let stats = TemplateStats {
            tx_count: block.transactions.len() - 1,
            block_size: self.block_size,
            block_sigops: self.block_sigops,
            descendants_updated,
        };
        info!(
            "new block template: height {}, {} txs, {} accounted bytes, {} in fees",
            self.height, stats.tx_count, stats.block_size, self.fees
        );
        debug!("block assembly took {:?}", instant.elapsed());

        BlockTemplate {
            block,
            tx_fees,
            tx_sig_ops,
            stats,
        }
    }
}
