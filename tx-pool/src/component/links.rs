use ferro_types::H256;
use std::collections::{HashMap, HashSet};

/// Direct dependency edges of one pool transaction.
#[derive(Default, Debug, Clone)]
pub struct TxLinks {
    pub parents: HashSet<H256>,
    pub children: HashSet<H256>,
}

#[derive(Clone, Copy)]
pub enum Relation {
    Parents,
    Children,
}

impl TxLinks {
    fn get_direct_ids(&self, relation: Relation) -> &HashSet<H256> {
        match relation {
            Relation::Parents => &self.parents,
            Relation::Children => &self.children,
        }
    }
}

/// The pool's dependency graph: direct parent/child edges per
/// transaction, with transitive closure queries for ancestors and
/// descendants.
#[derive(Default, Debug, Clone)]
pub struct TxLinksMap {
    inner: HashMap<H256, TxLinks>,
}

impl TxLinksMap {
    pub fn new() -> Self {
        TxLinksMap {
            inner: Default::default(),
        }
    }

    /// Registers `txid` with its direct parents and adds the matching
    /// child edges.
    pub fn add_link(&mut self, txid: H256, parents: HashSet<H256>) {
        for parent in &parents {
            self.inner.entry(*parent).or_default().children.insert(txid);
        }
        self.inner.entry(txid).or_default().parents = parents;
    }

    /// Unregisters `txid`, detaching it from its parents' child sets and
    /// its children's parent sets.
    pub fn remove(&mut self, txid: &H256) -> Option<TxLinks> {
        let links = self.inner.remove(txid)?;
        for parent in &links.parents {
            if let Some(parent_links) = self.inner.get_mut(parent) {
                parent_links.children.remove(txid);
            }
        }
        for child in &links.children {
            if let Some(child_links) = self.inner.get_mut(child) {
                child_links.parents.remove(txid);
            }
        }
        Some(links)
    }

    pub fn get_parents(&self, txid: &H256) -> Option<&HashSet<H256>> {
        self.inner.get(txid).map(|links| &links.parents)
    }

    pub fn get_children(&self, txid: &H256) -> Option<&HashSet<H256>> {
        self.inner.get(txid).map(|links| &links.children)
    }

    /// All transitive parents of `txid` still in the graph.
    pub fn calc_ancestors(&self, txid: &H256) -> HashSet<H256> {
        self.calc_relative_ids(txid, Relation::Parents)
    }

    /// All transitive children of `txid` still in the graph.
    pub fn calc_descendants(&self, txid: &H256) -> HashSet<H256> {
        self.calc_relative_ids(txid, Relation::Children)
    }

    fn calc_relative_ids(&self, txid: &H256, relation: Relation) -> HashSet<H256> {
        let direct = self
            .inner
            .get(txid)
            .map(|links| links.get_direct_ids(relation))
            .cloned()
            .unwrap_or_default();

        self.calc_relation_ids(direct, relation)
    }

    fn calc_relation_ids(&self, mut stage: HashSet<H256>, relation: Relation) -> HashSet<H256> {
        let mut relation_ids = HashSet::with_capacity(stage.len());

        while let Some(id) = stage.iter().next().copied() {
            if let Some(links) = self.inner.get(&id) {
                for direct_id in links.get_direct_ids(relation) {
                    if !relation_ids.contains(direct_id) {
                        stage.insert(*direct_id);
                    }
                }
            }
            stage.remove(&id);
            relation_ids.insert(id);
        }
        relation_ids
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
