use crate::component::entry::TxEntry;
use ferro_types::{Amount, FeeRate, H256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which package metric ranks candidates during block assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Absolute package fee.
    Fee,
    /// Package fee divided by package size.
    #[default]
    FeeRate,
}

/// Maps a candidate key back to the entry it ranks.
pub trait CandidateKey {
    fn txid(&self) -> H256;
}

/// A selection strategy: how entries are ranked, and when a package
/// reaches the minimum-feerate floor.
///
/// Both checks must agree with the key's ordering — the selection loop
/// terminates at the first package under the floor on the assumption that
/// extraction order is non-increasing in the floor metric.
pub trait SortStrategy {
    type Key: Ord + Clone + CandidateKey;

    fn sort_key(entry: &TxEntry) -> Self::Key;

    fn reaches_floor(package_fee: Amount, package_size: u64, floor: FeeRate) -> bool;
}

/// Ranks by absolute package fee, ties broken by txid.
pub struct ByPackageFee;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackageFeeKey {
    ancestors_fee: Amount,
    txid: H256,
}

impl CandidateKey for PackageFeeKey {
    fn txid(&self) -> H256 {
        self.txid
    }
}

impl SortStrategy for ByPackageFee {
    type Key = PackageFeeKey;

    fn sort_key(entry: &TxEntry) -> PackageFeeKey {
        PackageFeeKey {
            ancestors_fee: entry.ancestors_fee,
            txid: entry.txid(),
        }
    }

    fn reaches_floor(package_fee: Amount, package_size: u64, floor: FeeRate) -> bool {
        package_fee >= floor.fee(package_size)
    }
}

/// Ranks by package fee rate, ties broken by package size then txid.
pub struct ByPackageFeeRate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageFeeRateKey {
    ancestors_fee: Amount,
    ancestors_size: u64,
    txid: H256,
}

impl CandidateKey for PackageFeeRateKey {
    fn txid(&self) -> H256 {
        self.txid
    }
}

impl Ord for PackageFeeRateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare a_fee/a_size against b_fee/b_size without division.
        let lhs = i128::from(self.ancestors_fee.as_sats()) * i128::from(other.ancestors_size);
        let rhs = i128::from(other.ancestors_fee.as_sats()) * i128::from(self.ancestors_size);
        lhs.cmp(&rhs)
            .then_with(|| self.ancestors_size.cmp(&other.ancestors_size))
            .then_with(|| self.txid.cmp(&other.txid))
    }
}

impl PartialOrd for PackageFeeRateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortStrategy for ByPackageFeeRate {
    type Key = PackageFeeRateKey;

    fn sort_key(entry: &TxEntry) -> PackageFeeRateKey {
        PackageFeeRateKey {
            ancestors_fee: entry.ancestors_fee,
            ancestors_size: entry.ancestors_size,
            txid: entry.txid(),
        }
    }

    fn reaches_floor(package_fee: Amount, package_size: u64, floor: FeeRate) -> bool {
        FeeRate::from_fee_and_size(package_fee, package_size) >= floor
    }
}
