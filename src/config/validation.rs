//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default network exists and every RPC URL parses
//! - Validate value ranges (timeouts > 0, decimals representable in uint256)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::{AppConfig, ALCHEMY_KEY_PLACEHOLDER};
use crate::contracts::parse_contract_address;

/// A single semantic problem, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Largest exponent for which 10^decimals still fits in a uint256.
const MAX_DECIMALS: u8 = 77;

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::new(
            "default_network",
            format!("network '{}' is not defined", config.default_network),
        ));
    }

    for (name, network) in &config.networks {
        let field = |f: &str| format!("networks.{}.{}", name, f);

        // The placeholder is not URL-safe; check with a stand-in key.
        let substituted = network.rpc_url.replace(ALCHEMY_KEY_PLACEHOLDER, "key");
        if network.rpc_url.is_empty() {
            errors.push(ValidationError::new(field("rpc_url"), "must not be empty"));
        } else if substituted.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(field("rpc_url"), format!("invalid URL '{}'", network.rpc_url)));
        }

        for url in &network.failover_urls {
            if url.parse::<url::Url>().is_err() {
                errors.push(ValidationError::new(field("failover_urls"), format!("invalid URL '{}'", url)));
            }
        }

        if network.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new(field("rpc_timeout_secs"), "must be greater than 0"));
        }
        if network.confirmation_timeout_secs == 0 {
            errors.push(ValidationError::new(field("confirmation_timeout_secs"), "must be greater than 0"));
        }
        if network.receipt_poll_ms == 0 {
            errors.push(ValidationError::new(field("receipt_poll_ms"), "must be greater than 0"));
        }
    }

    if !config.contracts.voting_address.is_empty()
        && parse_contract_address(&config.contracts.voting_address).is_err()
    {
        errors.push(ValidationError::new(
            "contracts.voting_address",
            format!("'{}' is not an address", config.contracts.voting_address),
        ));
    }

    if config.deploy.candidates.iter().any(|c| c.trim().is_empty()) {
        errors.push(ValidationError::new("deploy.candidates", "candidate names must not be empty"));
    }
    if config.deploy.duration_minutes == 0 {
        errors.push(ValidationError::new("deploy.duration_minutes", "must be greater than 0"));
    }
    if config.deploy.token_decimals > MAX_DECIMALS {
        errors.push(ValidationError::new(
            "deploy.token_decimals",
            format!("must be at most {}", MAX_DECIMALS),
        ));
    }

    if config.watch.tick_secs == 0 {
        errors.push(ValidationError::new("watch.tick_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
