//! Gas guard and confirmation monitoring for submitted transactions.
//!
//! # Responsibilities
//! - Refuse to send while the network gas price is above the configured cap
//! - Poll receipts until the required confirmation depth is reached
//! - Report reverted transactions as errors

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::observability::metrics;
use crate::resilience::calculate_backoff;

/// Receipt poll delay stops doubling at this multiple of the base delay.
const POLL_MAX_FACTOR: u64 = 8;

/// Watches transactions sent through a signing provider.
#[derive(Debug, Clone)]
pub struct TxMonitor {
    client: BlockchainClient,
}

impl TxMonitor {
    /// Create a monitor reading through `client`.
    pub fn new(client: BlockchainClient) -> Self {
        Self { client }
    }

    /// Fail with `GasPriceTooHigh` if the current gas price exceeds the cap.
    pub async fn ensure_gas_price(&self) -> BlockchainResult<u128> {
        let gas_price = self.client.get_gas_price().await?;
        check_gas_price(gas_price, self.client.config().max_gas_price_gwei)?;
        Ok(gas_price)
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `kind` - Label for logs and metrics (e.g. `vote`)
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        kind: &'static str,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks().max(1);
        let timeout_secs = self.client.config().confirmation_timeout_secs;

        let result = timeout(
            Duration::from_secs(timeout_secs),
            self.poll_receipt(tx_hash, required_confirmations),
        )
        .await;

        let status = match result {
            Ok(status) => status?,
            Err(_) => {
                metrics::record_transaction(kind, "timeout");
                tracing::warn!(tx_hash = %tx_hash, kind, timeout_secs, "Transaction not confirmed in time");
                return Err(BlockchainError::ConfirmationTimeout(timeout_secs));
            }
        };

        match &status {
            ConfirmationStatus::Confirmed { block_number } => {
                metrics::record_transaction(kind, "confirmed");
                tracing::info!(tx_hash = %tx_hash, block_number, kind, "Transaction confirmed");
            }
            _ => {
                metrics::record_transaction(kind, "reverted");
                tracing::warn!(tx_hash = %tx_hash, kind, "Transaction reverted");
            }
        }
        Ok(status)
    }

    async fn poll_receipt(
        &self,
        tx_hash: TxHash,
        required_confirmations: u32,
    ) -> BlockchainResult<ConfirmationStatus> {
        let base_ms = self.client.config().receipt_poll_ms;
        let max_ms = base_ms.saturating_mul(POLL_MAX_FACTOR);
        let mut attempt = 0u32;

        loop {
            sleep(calculate_backoff(attempt, base_ms, max_ms)).await;
            attempt = attempt.saturating_add(1);

            let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.status() {
                return Ok(ConfirmationStatus::Failed("Transaction reverted".to_string()));
            }

            let current_block = self.client.get_block_number().await?;
            let tx_block = receipt.block_number.unwrap_or(current_block);
            let status = confirmation_status(tx_block, current_block, required_confirmations);

            if let ConfirmationStatus::Confirmed { .. } = status {
                return Ok(status);
            }

            tracing::debug!(tx_hash = %tx_hash, status = ?status, "Waiting for confirmations");
        }
    }
}

/// Compare a gas price in wei against a cap in gwei.
pub fn check_gas_price(gas_price_wei: u128, max_gwei: u64) -> BlockchainResult<()> {
    let gas_price_gwei = gas_price_wei / 1_000_000_000;
    if gas_price_gwei > max_gwei as u128 {
        return Err(BlockchainError::GasPriceTooHigh {
            current_gwei: u64::try_from(gas_price_gwei).unwrap_or(u64::MAX),
            max_gwei,
        });
    }
    Ok(())
}

/// Confirmation depth of a transaction mined in `tx_block`.
///
/// The inclusion block itself counts as the first confirmation.
pub fn confirmation_status(tx_block: u64, current_block: u64, required: u32) -> ConfirmationStatus {
    let depth = current_block.saturating_sub(tx_block).saturating_add(1);
    let current = u32::try_from(depth).unwrap_or(u32::MAX);
    if current >= required {
        ConfirmationStatus::Confirmed { block_number: tx_block }
    } else {
        ConfirmationStatus::Confirming { current, required }
    }
}
