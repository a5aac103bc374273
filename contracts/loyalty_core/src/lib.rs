#![no_std]

//! Shared loyalty rules and data for the coffee-shop contracts.
//!
//! The ledger contract is the only owner of point balances. Everything else
//! talks to it through [`LedgerClient`] and prices orders with the same
//! [`rules`] the ledger uses, so tier thresholds and redemption math live in
//! exactly one place.

mod ledger;
pub mod rules;
pub mod types;

pub use ledger::{LedgerClient, LedgerInterface};
pub use types::*;
