//! # Centralized Error Handling
//!
//! This module defines the workspace-wide error type [`AppError`] used by the
//! ledger client, the resource classifiers and configuration loading. It follows
//! the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Input Errors** - caller supplied something unusable
//!    - [`InvalidInput`](AppError::InvalidInput) - empty account, malformed coin address
//!
//! 2. **Fetch Errors** - the ledger could not answer
//!    - [`NotFound`](AppError::NotFound) - account or resource does not exist on-chain
//!    - [`Rpc`](AppError::Rpc) - transport failure or non-success HTTP status
//!
//! 3. **Parse Errors** - the ledger answered with something unexpected
//!    - [`Decoding`](AppError::Decoding) - malformed type string or resource payload
//!
//! 4. **Startup Errors**
//!    - [`Config`](AppError::Config) - missing or invalid environment settings
//!    - [`Internal`](AppError::Internal) - anything else
//!
//! The sync engine never hands these errors to its callers; they are logged and
//! collapsed into "no data" outcomes at the public boundary. Internally every
//! fallible step returns [`Result`] and propagates with `?`.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn owning_account(coin: &str) -> Result<&str> {
//!     coin.split_once("::")
//!         .map(|(account, _)| account)
//!         .ok_or_else(|| AppError::InvalidInput(format!("not a coin address: {coin}")))
//! }
//!
//! assert_eq!(owning_account("0x1::aptos_coin::AptosCoin").unwrap(), "0x1");
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Workspace-wide error type.
///
/// Each variant includes a descriptive `String` for context. The `#[error]` attribute
/// from `thiserror` provides automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger RPC error (network, HTTP status, node issues).
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Requested account or resource does not exist on-chain.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed resource payload or type string.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid caller input (empty account, malformed coin address).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error means "definitively absent" rather than "unknown".
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Short variant name, used as a structured field in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Rpc(_) => "Rpc",
            AppError::NotFound(_) => "NotFound",
            AppError::Decoding(_) => "Decoding",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

/// Convert environment lookup failures to `AppError`.
impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct_from_rpc() {
        assert!(AppError::NotFound("resource".into()).is_not_found());
        assert!(!AppError::Rpc("timeout".into()).is_not_found());
        assert_eq!(AppError::Rpc("timeout".into()).kind(), "Rpc");
    }

    #[test]
    fn test_json_error_maps_to_decoding() {
        let err: AppError = serde_json::from_str::<u64>("\"abc\"").unwrap_err().into();
        assert!(matches!(err, AppError::Decoding(_)));
        assert!(err.to_string().starts_with("Decoding error: JSON error"));
    }
}
