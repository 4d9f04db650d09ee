//! # Aptos Sync State
//!
//! Wires the sync engine's components into one cloneable container.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────┐
//! │   AptosState    │  ← Main state container
//! └────────┬────────┘
//!          │
//!          ├─► ConnectionManager   (client + SDK handles, renewal)
//!          ├─► ResourceAccessor    (single / full resource reads)
//!          ├─► ResourceSynchronizer(coin + LP balance maps)
//!          ├─► PairResolver        (reserves + LP supply of one pair)
//!          ├─► CoinRegistrar       (coin metadata registry)
//!          └─► CacheStore          (publish target)
//! ```
//!
//! Every component borrows handles from the one `ConnectionManager`, so a
//! `switch_network` is seen by all of them on their next call.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lib_aptos::{AptosState, MemoryStore};
//! use lib_core::Config;
//! use std::sync::Arc;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let state = AptosState::from_config(&Config::default(), store.clone())?;
//!
//! state.sync.sync_account_resources("0x1").await;
//! println!("{} coin balances", store.coin_balances().len());
//! # Ok(())
//! # }
//! ```

use crate::connection::ConnectionManager;
use crate::network::{ConnectionConfig, ConnectionType, SupportedChainId};
use crate::pair::PairResolver;
use crate::registrar::CoinRegistrar;
use crate::resources::ResourceAccessor;
use crate::store::CacheStore;
use crate::sync::ResourceSynchronizer;
use lib_core::{Config, Result};
use std::sync::Arc;
use std::time::Duration;

/// Main sync-engine state container.
///
/// All fields are Arc-wrapped, so cloning is cheap and clones share the same
/// connection handles and store.
#[derive(Clone)]
pub struct AptosState {
    pub connection: Arc<ConnectionManager>,
    pub store: Arc<dyn CacheStore>,
    pub resources: Arc<ResourceAccessor>,
    pub pairs: Arc<PairResolver>,
    pub sync: Arc<ResourceSynchronizer>,
    pub coins: Arc<CoinRegistrar>,
}

impl AptosState {
    /// Wire all components around an existing connection manager and store.
    pub fn new(connection: Arc<ConnectionManager>, store: Arc<dyn CacheStore>) -> Self {
        let resources = Arc::new(ResourceAccessor::new(Arc::clone(&connection)));
        let pairs = Arc::new(PairResolver::new(
            Arc::clone(&connection),
            Arc::clone(&resources),
            Arc::clone(&store),
        ));
        let sync = Arc::new(ResourceSynchronizer::new(
            Arc::clone(&connection),
            Arc::clone(&resources),
            Arc::clone(&pairs),
            Arc::clone(&store),
        ));
        let coins = Arc::new(CoinRegistrar::new(
            Arc::clone(&connection),
            Arc::clone(&resources),
            Arc::clone(&store),
        ));

        tracing::info!("Aptos sync state ready ({:?})", connection.connection_config().chain_id);

        Self {
            connection,
            store,
            resources,
            pairs,
            sync,
            coins,
        }
    }

    /// Build from environment-loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured connection or chain id is not supported.
    pub fn from_config(config: &Config, store: Arc<dyn CacheStore>) -> Result<Self> {
        let connection = ConnectionManager::new(
            ConnectionConfig::from_core(config)?,
            Duration::from_secs(config.request_timeout_secs),
        );
        Ok(Self::new(Arc::new(connection), store))
    }

    /// Point both handles at a new network.
    ///
    /// Requests already in flight finish against the previous endpoint.
    pub fn switch_network(&self, target: ConnectionType, chain_id: SupportedChainId) {
        tracing::info!("Switching network to {} (chain {})", target, chain_id.id());
        self.connection.renew_client(target.clone(), chain_id);
        self.connection.renew_sdk(target, chain_id);
    }
}
