//! # Swap Protocol SDK Handle
//!
//! Protocol-aware handle carrying the module-address table of the swap
//! protocol for one network, plus the type-string helpers in [`type_utils`].
//!
//! The handle is pure data: building one performs no I/O.

pub mod type_utils;

use crate::network::NetworkType;
use serde::{Deserialize, Serialize};

const COIN_STORE: &str = "0x1::coin::CoinStore";
const COIN_INFO: &str = "0x1::coin::CoinInfo";

/// The protocol is deployed from the same deployer (and so the same resource
/// account) on every network.
const DEPLOYER: &str = "0x16fe2df00ea7dde4a63409201f7f4e536bde7bb7335526a35d05111e68aa322c";
const RESOURCE_ACCOUNT: &str = "0x796900ebe1a1a54ff9e932f19c548f5c1af5c6e7d34965857ac2f7b1d1ab2cbf";

/// Module-address table of the swap protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modules {
    /// Swap module, e.g. `0x16fe...::AnimeSwapPoolV1`
    pub scripts: String,
    /// Coin-info type template (`0x1::coin::CoinInfo`)
    pub coin_info: String,
    /// Coin-store type template (`0x1::coin::CoinStore`)
    pub coin_store: String,
    /// Account holding pools and LP coin-info
    pub resource_account_address: String,
}

impl Modules {
    /// Static per-network table.
    pub fn for_network(network: NetworkType) -> Self {
        let (deployer, resource_account) = match network {
            NetworkType::Mainnet | NetworkType::Testnet | NetworkType::Devnet => {
                (DEPLOYER, RESOURCE_ACCOUNT)
            }
        };

        Self {
            scripts: format!("{}::AnimeSwapPoolV1", deployer),
            coin_info: COIN_INFO.to_string(),
            coin_store: COIN_STORE.to_string(),
            resource_account_address: resource_account.to_string(),
        }
    }

    /// LP coin namespace, `<resource account>::LPCoinV1::LPCoin`.
    pub fn lp_coin_namespace(&self) -> String {
        type_utils::compose_lp_coin_type(&self.resource_account_address)
    }
}

/// Options the SDK was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOptions {
    pub node_url: String,
    pub network: NetworkType,
    pub modules: Modules,
}

/// Protocol-aware handle bound to one (endpoint, network) pair.
#[derive(Debug, Clone)]
pub struct SwapSdk {
    network_options: NetworkOptions,
}

impl SwapSdk {
    pub fn new(node_url: impl Into<String>, network: NetworkType) -> Self {
        Self::with_modules(node_url, network, Modules::for_network(network))
    }

    /// Build with an explicit module table (local deployments, tests).
    pub fn with_modules(node_url: impl Into<String>, network: NetworkType, modules: Modules) -> Self {
        Self {
            network_options: NetworkOptions {
                node_url: node_url.into(),
                network,
                modules,
            },
        }
    }

    pub fn network_options(&self) -> &NetworkOptions {
        &self.network_options
    }

    pub fn modules(&self) -> &Modules {
        &self.network_options.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_modules() {
        let sdk = SwapSdk::new("https://fullnode.mainnet.aptoslabs.com/v1", NetworkType::Mainnet);
        let modules = sdk.modules();
        assert_eq!(modules.coin_store, "0x1::coin::CoinStore");
        assert_eq!(modules.coin_info, "0x1::coin::CoinInfo");
        assert_eq!(
            modules.scripts,
            "0x16fe2df00ea7dde4a63409201f7f4e536bde7bb7335526a35d05111e68aa322c::AnimeSwapPoolV1"
        );
        assert_eq!(
            modules.lp_coin_namespace(),
            "0x796900ebe1a1a54ff9e932f19c548f5c1af5c6e7d34965857ac2f7b1d1ab2cbf::LPCoinV1::LPCoin"
        );
        assert_eq!(sdk.network_options().network, NetworkType::Mainnet);
    }
}
