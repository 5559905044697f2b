//! Network credentials.
//!
//! # Security
//! - The private key is never logged; `Debug` redacts both secrets
//! - Environment variables take precedence over the secrets file

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::loader::ConfigError;

/// Environment variable overriding `privateKey`.
pub const PRIVATE_KEY_ENV_VAR: &str = "VOTING_PRIVATE_KEY";

/// Environment variable overriding `alchemyApiKey`.
pub const ALCHEMY_KEY_ENV_VAR: &str = "VOTING_ALCHEMY_API_KEY";

/// Credentials read from `secrets.json`.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Secrets {
    /// API key interpolated into Alchemy RPC URLs.
    pub alchemy_api_key: Option<String>,

    /// Hex-encoded deployer / voter private key.
    pub private_key: Option<String>,
}

impl Secrets {
    /// Load secrets from a JSON file, then apply environment overrides.
    ///
    /// A missing file is not an error: credentials may come from the
    /// environment alone.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut secrets = if path.exists() {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            serde_json::from_str(&content).map_err(ConfigError::Json)?
        } else {
            tracing::debug!(path = %path.display(), "No secrets file, using environment only");
            Self::default()
        };

        secrets.apply_env();
        Ok(secrets)
    }

    fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(PRIVATE_KEY_ENV_VAR).ok(),
            std::env::var(ALCHEMY_KEY_ENV_VAR).ok(),
        );
    }

    /// Replace file values with override values. Blank overrides are ignored.
    fn apply_overrides(&mut self, private_key: Option<String>, alchemy_api_key: Option<String>) {
        let present = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        if let Some(key) = present(private_key) {
            self.private_key = Some(key);
        }
        if let Some(key) = present(alchemy_api_key) {
            self.alchemy_api_key = Some(key);
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Secrets")
            .field("alchemy_api_key", &redact(&self.alchemy_api_key))
            .field("private_key", &redact(&self.private_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hardhat_secrets() {
        let secrets: Secrets = serde_json::from_str(
            r#"{ "alchemyApiKey": "abc123", "privateKey": "0xdeadbeef" }"#,
        )
        .unwrap();
        assert_eq!(secrets.alchemy_api_key.as_deref(), Some("abc123"));
        assert_eq!(secrets.private_key.as_deref(), Some("0xdeadbeef"));
    }

    #[test]
    fn test_blank_override_keeps_file_value() {
        let mut secrets = Secrets {
            alchemy_api_key: Some("abc123".to_string()),
            private_key: Some("0xdeadbeef".to_string()),
        };
        secrets.apply_overrides(Some(String::new()), Some("  ".to_string()));
        assert_eq!(secrets.private_key.as_deref(), Some("0xdeadbeef"));
        assert_eq!(secrets.alchemy_api_key.as_deref(), Some("abc123"));

        secrets.apply_overrides(Some("0xfeed".to_string()), None);
        assert_eq!(secrets.private_key.as_deref(), Some("0xfeed"));
        assert_eq!(secrets.alchemy_api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_debug_redacts() {
        let secrets = Secrets {
            alchemy_api_key: Some("abc123".to_string()),
            private_key: Some("0xdeadbeef".to_string()),
        };
        let printed = format!("{:?}", secrets);
        assert!(!printed.contains("abc123"));
        assert!(!printed.contains("deadbeef"));
        assert!(printed.contains("<redacted>"));
    }
}
