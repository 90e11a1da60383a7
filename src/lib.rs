//! This crate decides whether a single candidate transaction may be appended
//! to an in-memory, already-trusted chain of blocks.
//! It includes modules for data types, validation, shared chain state,
//! and configuration.

pub mod types; // Transactions, blocks, the chain and rejection reasons.
pub mod validation; // Admission rules: shape checks, replay scan and balance walk.
pub mod state; // Chain shared between concurrent validators and a writer.
pub mod config; // Economic parameters loaded from TOML.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::{Config, LedgerConfig};
pub use validation::{Clock, FixedClock, SystemClock, Validator};
pub use state::{LedgerError, SharedLedger};
