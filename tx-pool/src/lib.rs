//! The Ferro tx-pool: the pool of unconfirmed transactions with its
//! ancestor/descendant dependency graph, and the block template assembler
//! that selects fee-priority packages from it.

pub mod block_assembler;
pub mod component;
mod config;
mod error;
mod pool;

pub use block_assembler::{BlockAssembler, BlockTemplate, TemplateStats};
pub use component::entry::TxEntry;
pub use component::sort_key::SortMode;
pub use config::BlockAssemblerConfig;
pub use error::Reject;
pub use pool::TxPool;
