//! The hash functions the chain consensus uses.
//!
//! Transaction and block identifiers are double-SHA256 digests of the
//! canonical serialization.

use sha2::{Digest, Sha256};

/// Computes the double-SHA256 digest of `data`.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Computes a single SHA256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
