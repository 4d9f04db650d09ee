//! # Application Configuration
//!
//! This module manages the ledger connection settings loaded from environment
//! variables. All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `APTOS_CONNECTION` | `aptos` | connection target: `aptos` or a custom node URL |
//! | `APTOS_CHAIN_ID` | `1` | chain id (1 mainnet, 2 testnet, 3 devnet) |
//! | `APTOS_REQUEST_TIMEOUT_SECS` | `10` | per-request HTTP timeout |
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let chain_id = config.chain_id;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use crate::error::{AppError, Result};
use lib_utils::envs::{get_env_or, get_env_parse_or};
use std::sync::OnceLock;

pub const DEFAULT_CONNECTION: &str = "aptos";
pub const DEFAULT_CHAIN_ID: u8 = 1;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Ledger connection configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Connection target (`aptos` for the public fullnodes, or a node URL)
    pub connection: String,

    /// Numeric chain id of the network to read from
    pub chain_id: u8,

    /// HTTP timeout applied by the transport to every ledger request
    ///
    /// Valid range: 1-300 seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let connection = get_env_or("APTOS_CONNECTION", DEFAULT_CONNECTION);
        let chain_id = get_env_parse_or("APTOS_CHAIN_ID", DEFAULT_CHAIN_ID)?;
        let request_timeout_secs =
            get_env_parse_or("APTOS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            connection,
            chain_id,
            request_timeout_secs,
        })
    }

    /// Validate configuration values.
    ///
    /// Chain ids are checked against the supported set by the connection layer;
    /// here only `0` is rejected since no Aptos network uses it.
    pub fn validate(&self) -> Result<()> {
        if self.connection.trim().is_empty() {
            return Err(AppError::Config("APTOS_CONNECTION cannot be empty".to_string()));
        }

        if self.chain_id == 0 {
            return Err(AppError::Config("APTOS_CHAIN_ID must be non-zero".to_string()));
        }

        if self.request_timeout_secs < 1 || self.request_timeout_secs > 300 {
            return Err(AppError::Config(
                "APTOS_REQUEST_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// This should be called once at application startup, before any component
/// that builds a ledger connection from ambient configuration is used.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}
