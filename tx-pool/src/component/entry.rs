use ferro_types::{Amount, Transaction, H256};
use std::hash::{Hash, Hasher};

/// An entry in the transaction pool.
///
/// Alongside the transaction's own metrics it carries package aggregates
/// summed over the entry and all of its unconfirmed ancestors. The pool
/// maintains the aggregates as the dependency graph changes; during block
/// assembly the selection loop adjusts private copies as ancestors are
/// committed to the block.
#[derive(Debug, Clone, Eq)]
pub struct TxEntry {
    /// Transaction
    pub transaction: Transaction,
    /// Serialized size
    pub size: u64,
    /// Fee paid
    pub fee: Amount,
    /// Signature operations
    pub sig_op_count: u64,
    /// Size summed with all unconfirmed ancestors
    pub ancestors_size: u64,
    /// Fee summed with all unconfirmed ancestors
    pub ancestors_fee: Amount,
    /// Sigops summed with all unconfirmed ancestors
    pub ancestors_sig_ops: u64,
    /// Number of unconfirmed ancestors plus one
    pub ancestors_count: usize,
    txid: H256,
}

impl TxEntry {
    /// Creates an entry with explicit metrics; the package aggregates
    /// start at the entry's own values.
    pub fn new(transaction: Transaction, fee: Amount, size: u64, sig_op_count: u64) -> Self {
        let txid = transaction.hash();
        TxEntry {
            transaction,
            size,
            fee,
            sig_op_count,
            ancestors_size: size,
            ancestors_fee: fee,
            ancestors_sig_ops: sig_op_count,
            ancestors_count: 1,
            txid,
        }
    }

    /// Creates an entry deriving size and sigops from the transaction.
    pub fn from_transaction(transaction: Transaction, fee: Amount) -> Self {
        let size = transaction.serialized_size() as u64;
        let sig_op_count = transaction.sig_op_count();
        Self::new(transaction, fee, size, sig_op_count)
    }

    pub fn txid(&self) -> H256 {
        self.txid
    }

    /// Folds another entry's own weight into this entry's package
    /// aggregates.
    pub fn add_entry_weight(&mut self, entry: &TxEntry) {
        self.ancestors_count = self.ancestors_count.saturating_add(1);
        self.ancestors_size = self.ancestors_size.saturating_add(entry.size);
        self.ancestors_fee = self.ancestors_fee.saturating_add(entry.fee);
        self.ancestors_sig_ops = self.ancestors_sig_ops.saturating_add(entry.sig_op_count);
    }

    /// Removes another entry's own weight from this entry's package
    /// aggregates, the inverse of [`add_entry_weight`].
    ///
    /// [`add_entry_weight`]: TxEntry::add_entry_weight
    pub fn sub_entry_weight(&mut self, entry: &TxEntry) {
        self.ancestors_count = self.ancestors_count.saturating_sub(1);
        self.ancestors_size = self.ancestors_size.saturating_sub(entry.size);
        self.ancestors_fee = self.ancestors_fee.saturating_sub(entry.fee);
        self.ancestors_sig_ops = self.ancestors_sig_ops.saturating_sub(entry.sig_op_count);
    }
}

impl Hash for TxEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&self.txid, state);
    }
}

impl PartialEq for TxEntry {
    fn eq(&self, other: &TxEntry) -> bool {
        self.txid == other.txid
    }
}
