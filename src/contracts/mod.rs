//! Contract bindings, artifacts and deployment.
//!
//! # Data Flow
//! ```text
//! artifacts/contracts/<Name>.sol/<Name>.json
//!     → artifact.rs (bytecode + ABI, ContractFactory)
//!     → creation transaction → address
//!
//! deployed address
//!     → voting.rs (VotingContract over bindings.rs)
//!     → session
//! ```

pub mod artifact;
pub mod bindings;
pub mod voting;

pub use artifact::{Artifact, ContractFactory};
pub use voting::{parse_contract_address, Candidate, OnchainVoting, TxOutcome, VotingContract};
