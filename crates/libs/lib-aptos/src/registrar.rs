//! # Coin Registrar
//!
//! Resolves `CoinInfo` metadata for a coin address (`<account>::<module>::<name>`)
//! and adds it to the store's coin registry. Failures never reach the caller.

use crate::connection::ConnectionManager;
use crate::resources::ResourceAccessor;
use crate::sdk::type_utils::compose_type;
use crate::store::CacheStore;
use crate::types::{CoinInfoResource, CoinMetadata, Lookup};
use std::sync::Arc;
use tracing::{info, warn};

pub struct CoinRegistrar {
    connection: Arc<ConnectionManager>,
    accessor: Arc<ResourceAccessor>,
    store: Arc<dyn CacheStore>,
}

impl CoinRegistrar {
    pub fn new(
        connection: Arc<ConnectionManager>,
        accessor: Arc<ResourceAccessor>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            connection,
            accessor,
            store,
        }
    }

    /// Register the coin at `address`.
    ///
    /// Returns the published metadata, or `None` (with a log line) when the
    /// address is malformed, the coin has no `CoinInfo`, or the fetch fails.
    /// The registry is left unchanged in every `None` case.
    pub async fn add_coin(&self, address: &str) -> Option<CoinMetadata> {
        let account = match address.split_once("::") {
            Some((account, _)) if !account.is_empty() => account,
            _ => {
                warn!("add_coin: malformed coin address '{}'", address);
                return None;
            }
        };

        let sdk = self.connection.get_sdk();
        let info_type = compose_type(&sdk.modules().coin_info, &[address]);

        let data = match self.accessor.lookup_account_resource(account, &info_type).await {
            Lookup::Found(data) => data,
            Lookup::NotFound => {
                warn!("add_coin: no CoinInfo for {}", address);
                return None;
            }
            Lookup::Failed(e) => {
                warn!(kind = e.kind(), "add_coin: {} unavailable: {}", address, e);
                return None;
            }
        };

        let coin_info: CoinInfoResource = match serde_json::from_value(data) {
            Ok(coin_info) => coin_info,
            Err(e) => {
                warn!("add_coin: malformed CoinInfo for {}: {}", address, e);
                return None;
            }
        };

        let coin = CoinMetadata {
            address: address.to_string(),
            decimals: coin_info.decimals,
            symbol: coin_info.symbol,
            name: coin_info.name,
        };
        info!("Registered coin {} ({})", coin.symbol, coin.address);
        self.store.upsert_coin(coin.clone());
        Some(coin)
    }
}
