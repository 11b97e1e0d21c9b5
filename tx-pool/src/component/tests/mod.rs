mod links;

use crate::component::entry::TxEntry;
use ferro_types::{Amount, OutPoint, Script, Transaction, TxIn, TxOut, H256};

/// Builds a transaction spending the given outpoints, made unique by
/// `seed`.
pub(crate) fn build_tx(inputs: &[OutPoint], seed: i64) -> Transaction {
    Transaction {
        version: 1,
        inputs: inputs
            .iter()
            .map(|out_point| TxIn::new(*out_point, Script::new()))
            .collect(),
        outputs: vec![TxOut::new(Amount::from_sats(seed), Script::new())],
        lock_time: 0,
    }
}

pub(crate) fn build_entry(inputs: &[OutPoint], seed: i64, fee: i64, size: u64) -> TxEntry {
    TxEntry::new(build_tx(inputs, seed), Amount::from_sats(fee), size, 1)
}

pub(crate) fn dummy_outpoint(seed: u8) -> OutPoint {
    OutPoint::new(H256([seed; 32]), 0)
}
