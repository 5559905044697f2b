//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! voting.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! secrets.json + environment
//!     → secrets.rs (credentials, never logged)
//!     → loader::resolve_rpc_url (API key interpolation)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Credentials live apart from the config file

pub mod loader;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use loader::{load_config, load_config_or_default, resolve_rpc_url, ConfigError};
pub use schema::{AppConfig, ContractsConfig, DeployConfig, NetworkConfig, ObservabilityConfig, WatchConfig};
pub use secrets::Secrets;
