use crate::component::links::TxLinksMap;
use ferro_types::H256;
use std::collections::HashSet;

fn id(seed: u8) -> H256 {
    H256([seed; 32])
}

#[test]
fn add_link_registers_child_edges() {
    let mut map = TxLinksMap::new();
    map.add_link(id(2), HashSet::from([id(1)]));

    assert_eq!(map.get_parents(&id(2)), Some(&HashSet::from([id(1)])));
    assert_eq!(map.get_children(&id(1)), Some(&HashSet::from([id(2)])));
}

#[test]
fn calc_ancestors_is_transitive() {
    // 1 <- 2 <- 3, and 4 <- 3
    let mut map = TxLinksMap::new();
    map.add_link(id(1), HashSet::new());
    map.add_link(id(2), HashSet::from([id(1)]));
    map.add_link(id(4), HashSet::new());
    map.add_link(id(3), HashSet::from([id(2), id(4)]));

    assert_eq!(map.calc_ancestors(&id(3)), HashSet::from([id(1), id(2), id(4)]));
    assert_eq!(map.calc_ancestors(&id(2)), HashSet::from([id(1)]));
    assert!(map.calc_ancestors(&id(1)).is_empty());
}

#[test]
fn calc_descendants_is_transitive() {
    let mut map = TxLinksMap::new();
    map.add_link(id(1), HashSet::new());
    map.add_link(id(2), HashSet::from([id(1)]));
    map.add_link(id(3), HashSet::from([id(2)]));

    assert_eq!(map.calc_descendants(&id(1)), HashSet::from([id(2), id(3)]));
    assert!(map.calc_descendants(&id(3)).is_empty());
}

#[test]
fn remove_detaches_both_directions() {
    let mut map = TxLinksMap::new();
    map.add_link(id(1), HashSet::new());
    map.add_link(id(2), HashSet::from([id(1)]));
    map.add_link(id(3), HashSet::from([id(2)]));

    let links = map.remove(&id(2)).expect("registered");
    assert_eq!(links.parents, HashSet::from([id(1)]));
    assert_eq!(links.children, HashSet::from([id(3)]));

    assert!(map.get_children(&id(1)).expect("registered").is_empty());
    assert!(map.get_parents(&id(3)).expect("registered").is_empty());
    // 3 is no longer reachable from 1 through direct edges.
    assert!(map.calc_descendants(&id(1)).is_empty());
}

#[test]
fn missing_id_yields_empty_sets() {
    let map = TxLinksMap::new();
    assert_eq!(map.get_parents(&id(9)), None);
    assert!(map.calc_ancestors(&id(9)).is_empty());
    assert!(map.calc_descendants(&id(9)).is_empty());
}

#[test]
fn diamond_ancestors_counted_once() {
    // 1 <- 2, 1 <- 3, {2,3} <- 4
    let mut map = TxLinksMap::new();
    map.add_link(id(1), HashSet::new());
    map.add_link(id(2), HashSet::from([id(1)]));
    map.add_link(id(3), HashSet::from([id(1)]));
    map.add_link(id(4), HashSet::from([id(2), id(3)]));

    let ancestors = map.calc_ancestors(&id(4));
    assert_eq!(ancestors, HashSet::from([id(1), id(2), id(3)]));
}
