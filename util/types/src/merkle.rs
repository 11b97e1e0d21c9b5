use crate::hash::H256;
use ferro_hash::sha256d;

/// Computes the merkle root over transaction hashes: pairwise
/// double-SHA256, duplicating the last node of odd layers. Zero for an
/// empty set.
pub fn merkle_root(hashes: &[H256]) -> H256 {
    if hashes.is_empty() {
        return H256::zero();
    }
    let mut layer = hashes.to_vec();
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        for pair in layer.chunks(2) {
            let left = pair[0];
            let right = *pair.get(1).unwrap_or(&pair[0]);
            let mut buf = [0u8; 64];
            buf[..32].copy_from_slice(left.as_bytes());
            buf[32..].copy_from_slice(right.as_bytes());
            next.push(H256(sha256d(&buf)));
        }
        layer = next;
    }
    layer[0]
}
