//! Decentralized voting client library.
//!
//! Deploys the FollowToken and Voting contracts from compiled artifacts and
//! drives a deployed Voting contract from a connected account.

pub mod app;
pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod observability;
pub mod resilience;
pub mod session;

pub use app::{AppContext, AppError};
pub use config::schema::AppConfig;
pub use session::VotingSession;
