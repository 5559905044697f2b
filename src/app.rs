//! Command context: resolved configuration, credentials and network.

use alloy::primitives::Address;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::blockchain::types::{BlockchainError, NetworkConfig};
use crate::blockchain::wallet::{SignerHandle, Wallet, WalletConnector};
use crate::config::{load_config_or_default, resolve_rpc_url, AppConfig, ConfigError, Secrets};
use crate::contracts::parse_contract_address;
use crate::session::messages;

/// Top-level error for CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// A session action failed; carries the user-facing message.
    #[error("{0}")]
    Action(String),
}

/// Everything a command needs before touching the chain.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub secrets: Secrets,
    network_name: String,
    network: NetworkConfig,
}

impl AppContext {
    /// Load config and secrets from disk and select a network.
    pub fn load(config_path: &Path, secrets_path: &Path, network: Option<&str>) -> Result<Self, ConfigError> {
        let config = load_config_or_default(config_path)?;
        let secrets = Secrets::load(secrets_path)?;
        Self::from_parts(config, secrets, network)
    }

    /// Build a context from already-loaded parts.
    pub fn from_parts(config: AppConfig, secrets: Secrets, network: Option<&str>) -> Result<Self, ConfigError> {
        let (name, net) = config
            .network(network)
            .map(|(name, net)| (name.to_string(), net.clone()))
            .ok_or_else(|| {
                ConfigError::UnknownNetwork(network.unwrap_or(&config.default_network).to_string())
            })?;

        Ok(Self {
            config,
            secrets,
            network_name: name,
            network: net,
        })
    }

    /// Name of the selected network.
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Selected network's configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// RPC URL with credentials substituted.
    pub fn rpc_url(&self) -> Result<String, ConfigError> {
        resolve_rpc_url(&self.network, &self.secrets)
    }

    /// Root of the compiled artifacts tree.
    pub fn artifacts_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.contracts.artifacts_dir)
    }

    /// Voting contract address, preferring an explicit override.
    pub fn voting_address(&self, explicit: Option<&str>) -> Result<Address, AppError> {
        let raw = explicit.unwrap_or(&self.config.contracts.voting_address);
        parse_contract_address(raw).map_err(|_| AppError::Action(messages::INVALID_CONTRACT_ADDRESS.to_string()))
    }

    /// Load the wallet and connect it to the selected network.
    pub async fn connect(&self) -> Result<SignerHandle, AppError> {
        let wallet = Wallet::from_secrets(&self.secrets)?;
        let rpc_url = self.rpc_url()?;
        tracing::debug!(network = %self.network_name, "Connecting wallet");
        Ok(WalletConnector::connect(&wallet, &rpc_url, self.network.clone()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_network() {
        let ctx = AppContext::from_parts(AppConfig::default(), Secrets::default(), None).unwrap();
        assert_eq!(ctx.network_name(), "localhost");
        assert_eq!(ctx.rpc_url().unwrap(), "http://127.0.0.1:8545");

        let ctx = AppContext::from_parts(AppConfig::default(), Secrets::default(), Some("matic")).unwrap();
        assert_eq!(ctx.network().chain_id, 137);
        assert!(ctx.rpc_url().is_err());
    }

    #[test]
    fn test_unknown_network() {
        let err = AppContext::from_parts(AppConfig::default(), Secrets::default(), Some("mars")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown network 'mars'");
    }

    #[test]
    fn test_voting_address_override() {
        let ctx = AppContext::from_parts(AppConfig::default(), Secrets::default(), None).unwrap();
        assert!(ctx.voting_address(None).is_ok());

        let err = ctx.voting_address(Some("0xnope")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid contract address");
    }

    #[tokio::test]
    async fn test_connect_requires_key() {
        let ctx = AppContext::from_parts(AppConfig::default(), Secrets::default(), None).unwrap();
        let err = ctx.connect().await.unwrap_err();
        assert!(err.to_string().contains("No private key"));
    }
}
