//! Ferro shared utilities.
//!
//! Re-exports the lock types and the insertion-ordered map used across the
//! workspace, so member crates agree on a single implementation.

pub use linked_hash_map::LinkedHashMap;
pub use parking_lot::{
    self, Condvar, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
