use crate::{
    validation::{Clock, SystemClock, Validator},
    Address, Balance, Block, Chain, Rejection, Transaction,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("block carries {count} transactions, at most {max} allowed")]
    BlockTooLarge { count: usize, max: usize },
}

/// Chain shared between concurrent validations and a single writer.
///
/// Validations take the read lock and run side by side. Appending a block
/// takes the write lock, so no validation ever observes a half-extended chain.
pub struct SharedLedger<C = SystemClock> {
    chain: Arc<RwLock<Chain>>,
    validator: Arc<Validator<C>>,
}

impl<C> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(chain: Chain, validator: Validator<C>) -> Self {
        Self {
            chain: Arc::new(RwLock::new(chain)),
            validator: Arc::new(validator),
        }
    }

    pub fn validator(&self) -> &Validator<C> {
        &self.validator
    }

    /// Validate a candidate against the current chain
    pub async fn validate(&self, tx: &Transaction) -> Result<(), Rejection> {
        let chain = self.chain.read().await;
        self.validator.check(&chain, tx)
    }

    pub async fn is_valid(&self, tx: &Transaction) -> bool {
        self.validate(tx).await.is_ok()
    }

    pub async fn balance_of(&self, address: &Address) -> Balance {
        let chain = self.chain.read().await;
        self.validator.balance_of(&chain, address)
    }

    /// Append a block to the chain
    ///
    /// The block's transactions are trusted as-is; only its size is checked
    /// against `max_transactions_per_block`.
    ///
    /// # Returns
    /// The chain length after appending
    pub async fn append(&self, block: Block) -> Result<usize, LedgerError> {
        let max = self.validator.config().max_transactions_per_block;
        let count = block.transactions.len();
        if count > max {
            return Err(LedgerError::BlockTooLarge { count, max });
        }

        let mut chain = self.chain.write().await;
        chain.push(block);
        info!("Block #{} appended with {} transactions", chain.len() - 1, count);
        Ok(chain.len())
    }

    /// Copy of the current chain, for validation outside the lock
    pub async fn snapshot(&self) -> Chain {
        self.chain.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.chain.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LedgerConfig, validation::FixedClock, Signature};

    const NOW: i64 = 1_700_000_000;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn create_test_tx(from: u64, to: u64, amount: u64, signature: u64) -> Transaction {
        Transaction {
            from: addr(from),
            to: addr(to),
            amount,
            fee: 1,
            created_at: NOW - 1,
            signature: Signature::from_low_u64_be(signature),
        }
    }

    fn ledger(max_transactions_per_block: usize) -> SharedLedger<FixedClock> {
        let config = LedgerConfig {
            max_transactions_per_block,
            ..LedgerConfig::default()
        };
        SharedLedger::new(
            Chain::new(Block::empty(addr(1))),
            Validator::with_clock(config, FixedClock(NOW)),
        )
    }

    #[tokio::test]
    async fn test_append_then_validate() {
        let ledger = ledger(10);
        let tx = create_test_tx(1, 2, 500, 1);
        assert!(ledger.is_valid(&tx).await);

        assert_eq!(ledger.append(Block::new(addr(3), vec![tx.clone()])).await, Ok(2));
        assert_eq!(ledger.len().await, 2);
        assert_eq!(ledger.balance_of(&addr(1)).await, 499);
        assert_eq!(ledger.balance_of(&addr(3)).await, 1001);
        assert_eq!(
            ledger.validate(&tx).await,
            Err(Rejection::DuplicateSignature { block: 1 })
        );
    }

    #[tokio::test]
    async fn test_oversized_block_is_refused() {
        let ledger = ledger(2);
        let block = Block::new(
            addr(3),
            vec![
                create_test_tx(1, 2, 1, 1),
                create_test_tx(1, 2, 1, 2),
                create_test_tx(1, 2, 1, 3),
            ],
        );

        assert_eq!(
            ledger.append(block).await,
            Err(LedgerError::BlockTooLarge { count: 3, max: 2 })
        );
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let ledger = ledger(10);
        let snapshot = ledger.snapshot().await;
        ledger.append(Block::empty(addr(1))).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(ledger.validator().balance_of(&snapshot, &addr(1)), 1000);
        assert_eq!(ledger.balance_of(&addr(1)).await, 2000);
    }

    #[tokio::test]
    async fn test_concurrent_validations_and_append() {
        let ledger = ledger(10);
        let mut handles = Vec::new();

        for i in 0..8u64 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.is_valid(&create_test_tx(1, 2, 100, 100 + i)).await
            }));
        }
        let writer = {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.append(Block::empty(addr(1))).await })
        };

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(writer.await.unwrap(), Ok(2));
    }
}
