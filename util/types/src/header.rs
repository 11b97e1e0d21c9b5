use crate::hash::H256;
use crate::BlockNumber;
use ferro_hash::sha256d;

/// A block header ready for proof-of-work: 80 serialized bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Header {
    pub version: i32,
    pub prev_hash: H256,
    pub merkle_root: H256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub const SERIALIZED_SIZE: usize = 80;

    pub fn serialize(&self) -> [u8; Self::SERIALIZED_SIZE] {
        let mut buf = [0u8; Self::SERIALIZED_SIZE];
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..36].copy_from_slice(self.prev_hash.as_bytes());
        buf[36..68].copy_from_slice(self.merkle_root.as_bytes());
        buf[68..72].copy_from_slice(&self.time.to_le_bytes());
        buf[72..76].copy_from_slice(&self.bits.to_le_bytes());
        buf[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    pub fn hash(&self) -> H256 {
        H256(sha256d(&self.serialize()))
    }
}

/// A header as positioned in the chain index: the header plus its cached
/// hash and height. The assembler reads the tip through this view.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IndexedHeader {
    pub header: Header,
    pub hash: H256,
    pub height: BlockNumber,
}

impl IndexedHeader {
    pub fn new(header: Header, height: BlockNumber) -> Self {
        let hash = header.hash();
        IndexedHeader {
            header,
            hash,
            height,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}
