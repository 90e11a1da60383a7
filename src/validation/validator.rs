use crate::{
    config::LedgerConfig,
    validation::{Clock, SystemClock},
    Address, Balance, Chain, Rejection, Transaction,
};
use std::convert::Infallible;
use tracing::{debug, trace, warn};

/// Admission check for new transactions against the full chain history.
///
/// The validator holds no state between calls. Every verdict is a pure
/// function of the chain, the candidate and the clock reading, so it can be
/// shared freely between threads.
pub struct Validator<C = SystemClock> {
    config: LedgerConfig,
    clock: C,
}

impl Validator<SystemClock> {
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Validator<C> {
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Whether `tx` may be appended after `chain`
    pub fn is_valid(&self, chain: &Chain, tx: &Transaction) -> bool {
        self.check(chain, tx).is_ok()
    }

    /// Validate a candidate transaction
    /// Returns Ok(()) if admissible, Err(Rejection) naming the first failed rule
    ///
    /// Rules, in order:
    /// 1. Amount must be non-zero
    /// 2. Creation time must not be in the future
    /// 3. Sender and receiver must differ
    /// 4. No transaction in the chain may carry the same signature
    /// 5. Sender balance must cover amount plus fee
    pub fn check(&self, chain: &Chain, tx: &Transaction) -> Result<(), Rejection> {
        debug!("Validating transaction from {:?} to {:?}", tx.from, tx.to);

        let result = self
            .check_shape(tx)
            .and_then(|()| {
                self.walk(chain, &tx.from, |height, x| {
                    if x.signature == tx.signature {
                        return Err(Rejection::DuplicateSignature { block: height });
                    }
                    Ok(())
                })
            })
            .and_then(|available| Self::check_funds(tx, available));

        match &result {
            Ok(()) => debug!("Transaction validation successful"),
            Err(reason) => warn!("Transaction from {:?} rejected: {}", tx.from, reason),
        }
        result
    }

    /// Funds available to `address` after the last block of `chain`
    pub fn balance_of(&self, chain: &Chain, address: &Address) -> Balance {
        match self.walk(chain, address, |_, _| Ok::<(), Infallible>(())) {
            Ok(balance) => balance,
            Err(never) => match never {},
        }
    }

    /// Checks that need nothing but the transaction and the clock
    fn check_shape(&self, tx: &Transaction) -> Result<(), Rejection> {
        if tx.amount == 0 {
            return Err(Rejection::ZeroAmount);
        }

        let now = self.clock.now();
        if now < tx.created_at {
            return Err(Rejection::FutureTimestamp {
                created_at: tx.created_at,
                now,
            });
        }

        if tx.from == tx.to {
            return Err(Rejection::SelfTransfer);
        }

        Ok(())
    }

    /// Single pass over the chain, oldest block first.
    ///
    /// Accumulates the balance of `account`. Every transaction, whoever it
    /// involves, is also handed to `visit`; an error from it ends the walk.
    fn walk<E>(
        &self,
        chain: &Chain,
        account: &Address,
        mut visit: impl FnMut(usize, &Transaction) -> Result<(), E>,
    ) -> Result<Balance, E> {
        let reward = Balance::from(self.config.reward_per_block);
        let mut balance: Balance = 0;

        for (height, block) in chain.iter().enumerate() {
            let mined = block.miner == *account;
            if mined {
                balance += reward;
            }

            for x in &block.transactions {
                if x.to == *account {
                    balance += Balance::from(x.amount);
                }
                if mined {
                    balance += Balance::from(x.fee);
                }
                if x.from == *account {
                    balance -= x.total_cost();
                }
                visit(height, x)?;
            }

            // History is trusted; a dip below zero is only reported
            if balance < 0 {
                trace!("Balance of {:?} is {} after block {}", account, balance, height);
            }
        }

        trace!("Balance of {:?} after {} blocks: {}", account, chain.len(), balance);
        Ok(balance)
    }

    fn check_funds(tx: &Transaction, available: Balance) -> Result<(), Rejection> {
        let required = tx.total_cost();
        if available < required {
            return Err(Rejection::InsufficientFunds {
                required,
                available,
            });
        }
        Ok(())
    }
}
