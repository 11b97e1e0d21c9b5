use crate::encode::{var_int_size, write_var_int};
use crate::hash::H256;
use crate::script::Script;
use crate::{Amount, BlockNumber};
use ferro_hash::sha256d;

/// Sequence value that disables locktime enforcement for an input.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Locktime values below this threshold are block heights, values at or
/// above it are unix timestamps.
pub const LOCKTIME_THRESHOLD: u32 = 500_000_000;

/// A reference to an output of an earlier transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OutPoint {
    pub txid: H256,
    pub index: u32,
}

impl OutPoint {
    pub fn new(txid: H256, index: u32) -> Self {
        OutPoint { txid, index }
    }

    /// The null reference used by coinbase inputs.
    pub fn null() -> Self {
        OutPoint {
            txid: H256::zero(),
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    pub fn new(previous_output: OutPoint, script_sig: Script) -> Self {
        TxIn {
            previous_output,
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Script,
}

impl TxOut {
    pub fn new(value: Amount, script_pubkey: Script) -> Self {
        TxOut {
            value,
            script_pubkey,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// The transaction identifier: double-SHA256 of the serialization.
    pub fn hash(&self) -> H256 {
        H256(sha256d(&self.serialize()))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.serialized_size());
        buf.extend_from_slice(&self.version.to_le_bytes());
        write_var_int(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(input.previous_output.txid.as_bytes());
            buf.extend_from_slice(&input.previous_output.index.to_le_bytes());
            write_var_int(&mut buf, input.script_sig.len() as u64);
            buf.extend_from_slice(input.script_sig.as_bytes());
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }
        write_var_int(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.as_sats().to_le_bytes());
            write_var_int(&mut buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(output.script_pubkey.as_bytes());
        }
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    pub fn serialized_size(&self) -> usize {
        let mut size = 4 + var_int_size(self.inputs.len() as u64);
        for input in &self.inputs {
            let script_len = input.script_sig.len();
            size += 36 + var_int_size(script_len as u64) + script_len + 4;
        }
        size += var_int_size(self.outputs.len() as u64);
        for output in &self.outputs {
            let script_len = output.script_pubkey.len();
            size += 8 + var_int_size(script_len as u64) + script_len;
        }
        size + 4
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Contextual finality: can this transaction be mined in a block at
    /// `height` whose locktime cutoff is `time_cutoff`?
    pub fn is_final(&self, height: BlockNumber, time_cutoff: u32) -> bool {
        if self.lock_time == 0 {
            return true;
        }
        let cutoff = if self.lock_time < LOCKTIME_THRESHOLD {
            u64::from(height)
        } else {
            u64::from(time_cutoff)
        };
        if u64::from(self.lock_time) < cutoff {
            return true;
        }
        self.inputs
            .iter()
            .all(|input| input.sequence == SEQUENCE_FINAL)
    }

    /// Signature operations over all input and output scripts, without
    /// resolving pay-to-script-hash redemptions.
    pub fn sig_op_count(&self) -> u64 {
        let inputs: u64 = self
            .inputs
            .iter()
            .map(|input| input.script_sig.sig_op_count())
            .sum();
        let outputs: u64 = self
            .outputs
            .iter()
            .map(|output| output.script_pubkey.sig_op_count())
            .sum();
        inputs + outputs
    }
}
