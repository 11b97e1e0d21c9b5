use crate::encode::var_int_size;
use crate::hash::H256;
use crate::header::Header;
use crate::transaction::Transaction;

/// A block: header plus transactions, coinbase first.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Block {
            header,
            transactions,
        }
    }

    pub fn hash(&self) -> H256 {
        self.header.hash()
    }

    /// The first transaction, which a valid block requires to be the
    /// coinbase.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    pub fn serialized_size(&self) -> usize {
        Header::SERIALIZED_SIZE
            + var_int_size(self.transactions.len() as u64)
            + self
                .transactions
                .iter()
                .map(Transaction::serialized_size)
                .sum::<usize>()
    }
}
