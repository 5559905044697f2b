//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, NetworkConfig, ALCHEMY_KEY_PLACEHOLDER};
use crate::config::secrets::Secrets;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Json(serde_json::Error),
    Validation(Vec<ValidationError>),
    UnknownNetwork(String),
    MissingSecret(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Json(e) => write!(f, "Secrets parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::UnknownNetwork(name) => write!(f, "Unknown network '{}'", name),
            ConfigError::MissingSecret(what) => write!(f, "Missing secret: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration, using built-in defaults when the file does not exist.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Substitute credentials into a network's RPC URL.
pub fn resolve_rpc_url(network: &NetworkConfig, secrets: &Secrets) -> Result<String, ConfigError> {
    if !network.rpc_url.contains(ALCHEMY_KEY_PLACEHOLDER) {
        return Ok(network.rpc_url.clone());
    }

    let key = secrets
        .alchemy_api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::MissingSecret("alchemyApiKey"))?;

    Ok(network.rpc_url.replace(ALCHEMY_KEY_PLACEHOLDER, key))
}
