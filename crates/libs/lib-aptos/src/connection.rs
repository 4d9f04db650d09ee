//! # Connection Manager
//!
//! Owns the single live [`LedgerClient`] and [`SwapSdk`] handles.
//!
//! ```text
//! ┌──────────────────────┐
//! │  ConnectionManager   │  ← only writer of the handle slots
//! └──────────┬───────────┘
//!            ├─► client: Option<Arc<dyn LedgerClient>>   (built lazily)
//!            ├─► sdk:    Option<Arc<SwapSdk>>            (built lazily)
//!            └─► config: ConnectionConfig                (ambient target + chain)
//! ```
//!
//! Handles are built on first use from the ambient [`ConnectionConfig`]
//! and replaced only by an explicit `renew_*` call; the manager never detects
//! staleness on its own. A renew is a plain swap of the `Arc` under a short
//! lock: requests already holding the old handle finish against the old
//! endpoint, requests started afterwards use the new one.
//!
//! Lock order is always handle slot, then `config`. A renew holds both while
//! it swaps, so a lazy build never sees the new handle with the old config.

use crate::client::{AptosClient, LedgerClient};
use crate::network::{ConnectionConfig, ConnectionType, SupportedChainId};
use crate::sdk::SwapSdk;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds a client handle for an endpoint. Must not perform I/O.
pub type ClientFactory = Arc<dyn Fn(&str) -> Arc<dyn LedgerClient> + Send + Sync>;

pub struct ConnectionManager {
    config: RwLock<ConnectionConfig>,
    client: RwLock<Option<Arc<dyn LedgerClient>>>,
    sdk: RwLock<Option<Arc<SwapSdk>>>,
    client_factory: ClientFactory,
}

impl ConnectionManager {
    /// Manager whose clients are [`AptosClient`]s with the given request timeout.
    pub fn new(config: ConnectionConfig, request_timeout: Duration) -> Self {
        let factory: ClientFactory = Arc::new(move |endpoint: &str| {
            Arc::new(AptosClient::with_timeout(endpoint, request_timeout)) as Arc<dyn LedgerClient>
        });
        Self::with_client_factory(config, factory)
    }

    /// Manager with a custom client factory (alternate transports, tests).
    pub fn with_client_factory(config: ConnectionConfig, client_factory: ClientFactory) -> Self {
        Self {
            config: RwLock::new(config),
            client: RwLock::new(None),
            sdk: RwLock::new(None),
            client_factory,
        }
    }

    /// The ambient connection config lazily built handles are bound to.
    pub fn connection_config(&self) -> ConnectionConfig {
        self.config.read().clone()
    }

    /// Current client handle, built from the ambient config if none exists yet.
    pub fn get_client(&self) -> Arc<dyn LedgerClient> {
        if let Some(client) = self.client.read().as_ref() {
            return Arc::clone(client);
        }

        let mut slot = self.client.write();
        // Another caller may have built it between the two locks.
        if let Some(client) = slot.as_ref() {
            return Arc::clone(client);
        }

        let config = self.connection_config();
        let client = self.build_client(&config);
        *slot = Some(Arc::clone(&client));
        client
    }

    /// Replace the client handle unconditionally.
    ///
    /// Also records `(target, chain_id)` as the ambient config.
    pub fn renew_client(&self, target: ConnectionType, chain_id: SupportedChainId) {
        let config = ConnectionConfig::new(target, chain_id);
        let client = self.build_client(&config);

        let mut slot = self.client.write();
        let mut ambient = self.config.write();
        *slot = Some(client);
        *ambient = config;
    }

    /// Current SDK handle, built from the ambient config if none exists yet.
    pub fn get_sdk(&self) -> Arc<SwapSdk> {
        if let Some(sdk) = self.sdk.read().as_ref() {
            return Arc::clone(sdk);
        }

        let mut slot = self.sdk.write();
        if let Some(sdk) = slot.as_ref() {
            return Arc::clone(sdk);
        }

        let config = self.connection_config();
        let sdk = Self::build_sdk(&config);
        *slot = Some(Arc::clone(&sdk));
        sdk
    }

    /// Replace the SDK handle unconditionally.
    ///
    /// Also records `(target, chain_id)` as the ambient config.
    pub fn renew_sdk(&self, target: ConnectionType, chain_id: SupportedChainId) {
        let config = ConnectionConfig::new(target, chain_id);
        let sdk = Self::build_sdk(&config);

        let mut slot = self.sdk.write();
        let mut ambient = self.config.write();
        *slot = Some(sdk);
        *ambient = config;
    }

    fn build_client(&self, config: &ConnectionConfig) -> Arc<dyn LedgerClient> {
        let endpoint = config.rpc_url();
        info!("Ledger client created for {} (chain {})", endpoint, config.chain_id.id());
        (self.client_factory)(&endpoint)
    }

    fn build_sdk(config: &ConnectionConfig) -> Arc<SwapSdk> {
        let network = config.sdk_network();
        info!("Swap SDK created for {:?} ({})", network, config.target);
        Arc::new(SwapSdk::new(config.rpc_url(), network))
    }
}
