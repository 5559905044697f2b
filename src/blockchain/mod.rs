//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! secrets.json / VOTING_PRIVATE_KEY
//!     → wallet.rs (key loading, WalletConnector → SignerHandle)
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → transaction.rs (gas guard, confirmation polling)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or API keys (RPC URLs are redacted)
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxMonitor;
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus, NetworkConfig};
pub use wallet::{SignerHandle, Wallet, WalletConnector};
