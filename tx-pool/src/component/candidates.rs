use crate::component::entry::TxEntry;
use crate::component::sort_key::{CandidateKey, SortStrategy};
use ferro_types::H256;
use std::collections::{BTreeSet, HashMap};

/// Entries still eligible for selection, kept in two indexes: a map by
/// txid for lookup and mutation, and a sorted set of strategy keys for
/// extract-max.
///
/// Invariant: `sorted_index` holds exactly one key per entry in
/// `entries`, computed from the entry's current package totals. Callers
/// that mutate an entry's totals must remove it first and reinsert it
/// after.
pub struct CandidateEntries<S: SortStrategy> {
    entries: HashMap<H256, TxEntry>,
    sorted_index: BTreeSet<S::Key>,
}

impl<S: SortStrategy> Default for CandidateEntries<S> {
    fn default() -> Self {
        CandidateEntries {
            entries: HashMap::default(),
            sorted_index: BTreeSet::default(),
        }
    }
}

impl<S: SortStrategy> CandidateEntries<S> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, txid: &H256) -> bool {
        self.entries.contains_key(txid)
    }

    pub fn get(&self, txid: &H256) -> Option<&TxEntry> {
        self.entries.get(txid)
    }

    pub fn insert(&mut self, entry: TxEntry) {
        self.sorted_index.insert(S::sort_key(&entry));
        self.entries.insert(entry.txid(), entry);
    }

    pub fn remove(&mut self, txid: &H256) -> Option<TxEntry> {
        self.entries.remove(txid).map(|entry| {
            self.sorted_index.remove(&S::sort_key(&entry));
            entry
        })
    }

    /// Removes and returns the entry whose key ranks highest.
    pub fn pop_max(&mut self) -> Option<TxEntry> {
        self.sorted_index.pop_last().map(|key| {
            self.entries
                .remove(&key.txid())
                .expect("candidate indexes are consistent")
        })
    }
}

impl<S: SortStrategy> FromIterator<TxEntry> for CandidateEntries<S> {
    fn from_iter<T: IntoIterator<Item = TxEntry>>(iter: T) -> Self {
        let mut candidates = CandidateEntries::default();
        for entry in iter {
            candidates.insert(entry);
        }
        candidates
    }
}
