//! Unconfirmed transaction set with maintained package aggregates.

use crate::component::entry::TxEntry;
use crate::component::links::TxLinksMap;
use crate::error::Reject;
use ferro_logger::trace;
use ferro_types::H256;
use std::collections::{HashMap, HashSet};

/// The transaction pool: entries keyed by txid plus the dependency graph
/// between them.
///
/// Every entry's package aggregates are kept in sync with the graph, so
/// block assembly can seed its candidate set directly from the stored
/// entries.
#[derive(Default)]
pub struct TxPool {
    entries: HashMap<H256, TxEntry>,
    links: TxLinksMap,
}

impl TxPool {
    pub fn new() -> Self {
        TxPool::default()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, txid: &H256) -> bool {
        self.entries.contains_key(txid)
    }

    pub fn get(&self, txid: &H256) -> Option<&TxEntry> {
        self.entries.get(txid)
    }

    pub fn entries(&self) -> impl Iterator<Item = &TxEntry> {
        self.entries.values()
    }

    /// Adds an entry whose unconfirmed parents are `parents`. Each named
    /// parent must already be in the pool; the new entry's package
    /// aggregates absorb the weight of its full ancestor set.
    pub fn add_entry(&mut self, mut entry: TxEntry, parents: &[H256]) -> Result<(), Reject> {
        let txid = entry.txid();
        if self.entries.contains_key(&txid) {
            return Err(Reject::Duplicated(txid));
        }
        for parent in parents {
            if !self.entries.contains_key(parent) {
                return Err(Reject::Orphan(txid));
            }
        }

        self.links
            .add_link(txid, parents.iter().copied().collect());
        for ancestor_id in self.links.calc_ancestors(&txid) {
            let ancestor = self
                .entries
                .get(&ancestor_id)
                .expect("pool graph ids resolve to entries");
            entry.add_entry_weight(ancestor);
        }
        trace!("tx-pool add {} parents {}", txid, parents.len());
        self.entries.insert(txid, entry);
        Ok(())
    }

    /// Removes an entry together with its whole descendant cone, since a
    /// descendant cannot outlive an unconfirmed input. Returns the
    /// removed entries.
    pub fn remove_entry(&mut self, txid: &H256) -> Vec<TxEntry> {
        let mut removed = Vec::new();
        if !self.entries.contains_key(txid) {
            return removed;
        }
        let mut ids = vec![*txid];
        ids.extend(self.links.calc_descendants(txid));
        for id in ids {
            if let Some(entry) = self.entries.remove(&id) {
                self.links.remove(&id);
                removed.push(entry);
            }
        }
        trace!("tx-pool remove {} evicted {}", txid, removed.len());
        removed
    }

    pub fn calc_ancestors(&self, txid: &H256) -> HashSet<H256> {
        self.links.calc_ancestors(txid)
    }

    pub fn calc_descendants(&self, txid: &H256) -> HashSet<H256> {
        self.links.calc_descendants(txid)
    }
}
