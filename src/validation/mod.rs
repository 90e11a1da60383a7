//! Transaction Validation Module
//! 
//! This module decides whether a candidate transaction may follow a chain.
//! Performs well-formedness checks, a replay scan over every historical
//! signature, and a balance check for the sender.

mod clock;
mod validator;


pub use clock::{Clock, FixedClock, SystemClock};
pub use validator::Validator;
