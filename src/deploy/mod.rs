//! One-shot deployment procedures.
//!
//! Each procedure loads the contract's artifact, encodes the constructor
//! arguments, submits the creation transaction through the connected
//! account and returns the new address.

pub mod token;
pub mod voting;

pub use token::{deploy_follow_token, parse_supply, TokenDeployment};
pub use voting::{deploy_voting, VotingDeployment};
