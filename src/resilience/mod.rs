//! Resilience helpers.
//!
//! # Data Flow
//! ```text
//! Reads:  client.rs fails over across RPC endpoints, each call under a timeout
//! Writes: transaction.rs polls for receipts, spacing polls with backoff.rs
//! ```
//!
//! # Design Decisions
//! - Writes are never resubmitted; only receipt polling is repeated
//! - Jittered backoff keeps concurrent clients from polling in lockstep

pub mod backoff;

pub use backoff::calculate_backoff;
