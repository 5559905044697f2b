//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted with the Alchemy API key when resolving RPC URLs.
pub const ALCHEMY_KEY_PLACEHOLDER: &str = "{alchemy_api_key}";

/// Voting contract address used when neither config nor CLI provide one.
pub const DEFAULT_VOTING_ADDRESS: &str = "0xA6C9e8D77eA0c1D673E1B67F5b153dAB0fC41D41";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network used when `--network` is not given.
    pub default_network: String,

    /// Named JSON-RPC networks.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Deployed contract locations and compiled artifacts.
    pub contracts: ContractsConfig,

    /// Constructor arguments for the deploy commands.
    pub deploy: DeployConfig,

    /// Live view settings.
    pub watch: WatchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert("localhost".to_string(), NetworkConfig::default());
        networks.insert(
            "matic".to_string(),
            NetworkConfig {
                rpc_url: format!(
                    "https://polygon-mainnet.g.alchemy.com/v2/{}",
                    ALCHEMY_KEY_PLACEHOLDER
                ),
                chain_id: 137,
                ..NetworkConfig::default()
            },
        );

        Self {
            default_network: "localhost".to_string(),
            networks,
            contracts: ContractsConfig::default(),
            deploy: DeployConfig::default(),
            watch: WatchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Look up a network by name, falling back to `default_network`.
    pub fn network(&self, name: Option<&str>) -> Option<(&str, &NetworkConfig)> {
        let name = name.unwrap_or(&self.default_network);
        self.networks
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// JSON-RPC network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL. May contain `{alchemy_api_key}`.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, used for reads only.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 137 for Polygon, 31337 for a local node).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a write counts as included.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a transaction to confirm.
    pub confirmation_timeout_secs: u64,

    /// Base delay between receipt polls; doubles per attempt up to 8x.
    pub receipt_poll_ms: u64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            receipt_poll_ms: 500,
            max_gas_price_gwei: 500,
        }
    }
}

/// Contract locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Address of the deployed Voting contract.
    pub voting_address: String,

    /// Root of the compiled artifacts tree (Hardhat layout).
    pub artifacts_dir: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            voting_address: DEFAULT_VOTING_ADDRESS.to_string(),
            artifacts_dir: "artifacts".to_string(),
        }
    }
}

/// Deployment parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// FollowToken initial supply in whole tokens (decimal string).
    pub token_initial_supply: String,

    /// FollowToken decimals used to scale the initial supply.
    pub token_decimals: u8,

    /// Initial candidate list for the Voting contract.
    pub candidates: Vec<String>,

    /// Voting window length in minutes, counted from deployment.
    pub duration_minutes: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            token_initial_supply: "100000".to_string(),
            token_decimals: 18,
            candidates: vec!["Alice".to_string(), "Bob".to_string(), "Charlie".to_string()],
            // One year, long enough for testing.
            duration_minutes: 525_600,
        }
    }
}

/// Live view (`watch`) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Countdown tick interval in seconds.
    pub tick_secs: u64,

    /// Candidate refresh interval in seconds (0 disables refresh).
    pub refresh_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            tick_secs: 1,
            refresh_secs: 15,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
