//! Chain-specific types and error definitions.

use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured timeout.
    #[error("Transaction not confirmed within {0} seconds")]
    ConfirmationTimeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Contract call or transaction submission rejected (carries the node's message).
    #[error("Contract error: {0}")]
    Contract(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Compiled artifact missing or malformed.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Address string failed validation.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl From<alloy::contract::Error> for BlockchainError {
    fn from(e: alloy::contract::Error) -> Self {
        BlockchainError::Contract(e.to_string())
    }
}

impl From<alloy::transports::TransportError> for BlockchainError {
    fn from(e: alloy::transports::TransportError) -> Self {
        BlockchainError::Contract(e.to_string())
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction failed or was dropped.
    Failed(String),
}

impl ConfirmationStatus {
    /// Turn a terminal status into a result, treating failure as a revert.
    pub fn into_block(self) -> BlockchainResult<u64> {
        match self {
            ConfirmationStatus::Confirmed { block_number } => Ok(block_number),
            ConfirmationStatus::Failed(reason) => Err(BlockchainError::Reverted(reason)),
            other => Err(BlockchainError::Rpc(format!("transaction not final: {:?}", other))),
        }
    }
}
