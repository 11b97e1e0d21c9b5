/// Opcode constants, limited to what script construction and sigop
/// accounting need. Script execution is out of scope for this crate.
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
    pub const OP_16: u8 = 0x60;
    pub const OP_RETURN: u8 = 0x6a;
    pub const OP_CHECKSIG: u8 = 0xac;
    pub const OP_CHECKSIGVERIFY: u8 = 0xad;
    pub const OP_CHECKMULTISIG: u8 = 0xae;
    pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;
}

use opcodes::*;

/// Legacy sigop accounting charges a full multisig this many ops when the
/// key count is not statically known.
const MULTISIG_SIGOPS: u64 = 20;

/// A serialized script.
///
/// This is a builder and accounting view only: it can append pushes and
/// opcodes and count signature operations, but it does not interpret.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a bare opcode.
    pub fn push_opcode(&mut self, opcode: u8) {
        self.0.push(opcode);
    }

    /// Appends `n` using the minimal push encoding.
    pub fn push_int(&mut self, n: i64) {
        if n == 0 {
            self.0.push(OP_0);
        } else if n == -1 {
            self.0.push(OP_1NEGATE);
        } else if (1..=16).contains(&n) {
            self.0.push(OP_1 + (n as u8 - 1));
        } else {
            let bytes = script_num(n);
            self.push_slice(&bytes);
        }
    }

    /// Appends `data` with the appropriate push prefix.
    pub fn push_slice(&mut self, data: &[u8]) {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
    }

    /// Counts signature operations without executing the script.
    ///
    /// CHECKSIG variants count one, CHECKMULTISIG variants count the legacy
    /// flat 20. A truncated push ends the scan, matching reference
    /// behavior for malformed scripts.
    pub fn sig_op_count(&self) -> u64 {
        let bytes = &self.0;
        let mut count = 0u64;
        let mut i = 0usize;
        while i < bytes.len() {
            let opcode = bytes[i];
            i += 1;
            let data_len = match opcode {
                1..=0x4b => opcode as usize,
                OP_PUSHDATA1 => {
                    if i >= bytes.len() {
                        break;
                    }
                    let len = bytes[i] as usize;
                    i += 1;
                    len
                }
                OP_PUSHDATA2 => {
                    if i + 2 > bytes.len() {
                        break;
                    }
                    let len = u16::from_le_bytes([bytes[i], bytes[i + 1]]) as usize;
                    i += 2;
                    len
                }
                OP_PUSHDATA4 => {
                    if i + 4 > bytes.len() {
                        break;
                    }
                    let len = u32::from_le_bytes([
                        bytes[i],
                        bytes[i + 1],
                        bytes[i + 2],
                        bytes[i + 3],
                    ]) as usize;
                    i += 4;
                    len
                }
                OP_CHECKSIG | OP_CHECKSIGVERIFY => {
                    count += 1;
                    0
                }
                OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                    count += MULTISIG_SIGOPS;
                    0
                }
                _ => 0,
            };
            if i + data_len > bytes.len() {
                break;
            }
            i += data_len;
        }
        count
    }
}

/// Minimal script-number serialization: little-endian magnitude with a
/// sign bit in the top bit of the last byte.
fn script_num(n: i64) -> Vec<u8> {
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::new();
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    if let Some(last) = out.last_mut() {
        if *last & 0x80 != 0 {
            out.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            *last |= 0x80;
        }
    }
    out
}
