//! # Network Selection
//!
//! Resolves a connection target and chain id into an RPC endpoint and the
//! swap-protocol network identifier.
//!
//! ## RPC Endpoints
//!
//! | Chain id | Network | Endpoint (for [`ConnectionType::Aptos`]) |
//! |---|---|---|
//! | 1 | Mainnet | `https://fullnode.mainnet.aptoslabs.com/v1` |
//! | 2 | Testnet | `https://fullnode.testnet.aptoslabs.com/v1` |
//! | 3 | Devnet  | `https://fullnode.devnet.aptoslabs.com/v1` |
//!
//! A [`ConnectionType::Custom`] target ignores the table and always uses its own URL.

use lib_core::{AppError, Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which node the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    /// Public Aptos Labs fullnodes, chosen per chain id
    Aptos,
    /// A user-supplied node URL
    Custom(String),
}

impl FromStr for ConnectionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("aptos") {
            Ok(ConnectionType::Aptos)
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Ok(ConnectionType::Custom(s.trim_end_matches('/').to_string()))
        } else {
            Err(AppError::Config(format!(
                "Unknown connection '{}': expected 'aptos' or an http(s) URL",
                s
            )))
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionType::Aptos => write!(f, "aptos"),
            ConnectionType::Custom(url) => write!(f, "{}", url),
        }
    }
}

/// Chain ids the swap protocol is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SupportedChainId {
    Mainnet = 1,
    Testnet = 2,
    Devnet = 3,
}

impl SupportedChainId {
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SupportedChainId {
    type Error = AppError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(SupportedChainId::Mainnet),
            2 => Ok(SupportedChainId::Testnet),
            3 => Ok(SupportedChainId::Devnet),
            other => Err(AppError::Config(format!("Unsupported chain id: {}", other))),
        }
    }
}

/// Network identifier understood by the swap SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Devnet,
}

/// Fixed chain id → SDK network lookup.
pub fn sdk_network_for(chain_id: SupportedChainId) -> NetworkType {
    match chain_id {
        SupportedChainId::Mainnet => NetworkType::Mainnet,
        SupportedChainId::Testnet => NetworkType::Testnet,
        SupportedChainId::Devnet => NetworkType::Devnet,
    }
}

/// Resolve the RPC endpoint for a connection target on a chain.
pub fn get_rpc_url(connection: &ConnectionType, chain_id: SupportedChainId) -> String {
    match connection {
        ConnectionType::Custom(url) => url.clone(),
        ConnectionType::Aptos => match chain_id {
            SupportedChainId::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1".to_string(),
            SupportedChainId::Testnet => "https://fullnode.testnet.aptoslabs.com/v1".to_string(),
            SupportedChainId::Devnet => "https://fullnode.devnet.aptoslabs.com/v1".to_string(),
        },
    }
}

/// The (target, chain) pair that decides which handles are valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub target: ConnectionType,
    pub chain_id: SupportedChainId,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(ConnectionType::Aptos, SupportedChainId::Mainnet)
    }
}

impl ConnectionConfig {
    pub fn new(target: ConnectionType, chain_id: SupportedChainId) -> Self {
        Self { target, chain_id }
    }

    /// Build from the environment-loaded core configuration.
    pub fn from_core(config: &Config) -> Result<Self> {
        Ok(Self {
            target: config.connection.parse()?,
            chain_id: SupportedChainId::try_from(config.chain_id)?,
        })
    }

    pub fn rpc_url(&self) -> String {
        get_rpc_url(&self.target, self.chain_id)
    }

    pub fn sdk_network(&self) -> NetworkType {
        sdk_network_for(self.chain_id)
    }
}
