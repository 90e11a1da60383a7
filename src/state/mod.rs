//! State Management Module
//! 
//! This module holds the in-memory chain shared between validating readers
//! and the component that extends it with new blocks.

mod ledger;
pub use ledger::{LedgerError, SharedLedger};
