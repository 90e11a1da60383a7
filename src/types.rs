use ethers::types::H256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ethers::types::Address;

/// Opaque 32-byte transaction signature, compared byte-for-byte and never verified
pub type Signature = H256;

/// Smallest indivisible unit of value
pub type Satoshi = u64;

/// Unix time in seconds
pub type Timestamp = i64;

/// Running account balance.
///
/// Wide and signed: sums of `u64` amounts cannot overflow it, and an
/// inconsistent history shows up as a negative number instead of wrapping.
pub type Balance = i128;

/// Value transfer from one address to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Address,
    pub to: Address,
    pub amount: Satoshi,
    pub fee: Satoshi,
    pub created_at: Timestamp,
    pub signature: Signature,
}

impl Transaction {
    /// Everything the sender pays: the transferred amount plus the miner's fee
    pub fn total_cost(&self) -> Balance {
        Balance::from(self.amount) + Balance::from(self.fee)
    }
}

/// An ordered group of transactions and the miner credited with adding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub transactions: Vec<Transaction>,
    pub miner: Address,
}

impl Block {
    pub fn new(miner: Address, transactions: Vec<Transaction>) -> Self {
        Self { transactions, miner }
    }

    /// A block without transactions; its miner still earns the block reward
    pub fn empty(miner: Address) -> Self {
        Self::new(miner, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("a chain needs at least a genesis block")]
    Empty,
}

/// Full block history, genesis first.
///
/// A chain always holds at least one block. Both the constructors and
/// deserialization enforce it, so an empty history never reaches the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    pub fn new(genesis: Block) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::Empty);
        }
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// Most recently appended block
    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false, kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn transaction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.transactions.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

impl TryFrom<Vec<Block>> for Chain {
    type Error = ChainError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Chain::from_blocks(blocks)
    }
}

impl From<Chain> for Vec<Block> {
    fn from(chain: Chain) -> Self {
        chain.blocks
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Why a candidate transaction cannot follow the chain
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("transaction amount is zero")]
    ZeroAmount,
    #[error("transaction created in the future: created at {created_at}, now {now}")]
    FutureTimestamp { created_at: Timestamp, now: Timestamp },
    #[error("sender and receiver are the same address")]
    SelfTransfer,
    #[error("signature already used by a transaction in block {block}")]
    DuplicateSignature { block: usize },
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Balance, available: Balance },
}
