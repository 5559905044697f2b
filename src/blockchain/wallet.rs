//! Local key wallet and the connector that turns it into a signing handle.
//!
//! # Security
//! - Private keys come from the secrets file or `VOTING_PRIVATE_KEY` only
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, NetworkConfig};
use crate::config::secrets::{Secrets, PRIVATE_KEY_ENV_VAR};

/// Wallet holding the account's private key.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet loaded");

        Ok(Self { signer })
    }

    /// Load the wallet from resolved secrets.
    pub fn from_secrets(secrets: &Secrets) -> BlockchainResult<Self> {
        let key = secrets.private_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            BlockchainError::Wallet(format!(
                "No private key: set privateKey in the secrets file or {}",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;
        Self::from_private_key(key)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Network wallet used by the signing provider.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Connected account: a signing provider plus a read client for the same network.
#[derive(Clone)]
pub struct SignerHandle {
    provider: DynProvider,
    account: Address,
    client: BlockchainClient,
}

impl SignerHandle {
    /// Provider that fills nonce, gas and chain id, and signs with the wallet.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Address of the connected account.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Read-only client with failover for the same network.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}

impl std::fmt::Debug for SignerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerHandle")
            .field("account", &self.account)
            .field("client", &self.client)
            .finish()
    }
}

/// Requests account access and hands out a [`SignerHandle`].
pub struct WalletConnector;

impl WalletConnector {
    /// Connect `wallet` to the network at `rpc_url`.
    pub async fn connect(
        wallet: &Wallet,
        rpc_url: &str,
        network: NetworkConfig,
    ) -> BlockchainResult<SignerHandle> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL: {}", e)))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        let client = BlockchainClient::new(rpc_url, network).await?;
        let account = wallet.address();

        tracing::info!(account = %account, chain_id = client.config().chain_id, "Wallet connected");

        Ok(SignerHandle {
            provider,
            account,
            client,
        })
    }
}
