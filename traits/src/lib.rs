//! Interfaces between Ferro components.

use ferro_types::IndexedHeader;

/// Read access to chain state, as consumed by the block assembler.
///
/// Implementations are expected to answer from an index that is
/// consistent for the duration of one template assembly; the assembler
/// reads the tip exactly once per pass.
pub trait ChainProvider {
    /// The current best chain tip, `None` before the genesis block.
    fn tip(&self) -> Option<IndexedHeader>;

    /// Median timestamp of the last 11 blocks ending at `header`.
    fn median_time_past(&self, header: &IndexedHeader) -> u32;

    /// Network-adjusted wall-clock time.
    fn adjusted_time(&self) -> u32;

    /// Header version negotiated through version-bits deployments for a
    /// block following `prev`.
    fn block_version(&self, prev: Option<&IndexedHeader>) -> i32;
}
