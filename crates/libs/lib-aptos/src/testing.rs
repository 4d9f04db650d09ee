//! In-memory ledger used by the unit tests.

use crate::client::LedgerClient;
use crate::connection::{ClientFactory, ConnectionManager};
use crate::network::ConnectionConfig;
use crate::types::RawResource;
use async_trait::async_trait;
use lib_core::{AppError, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

pub const APT: &str = "0x1::aptos_coin::AptosCoin";
pub const USDC: &str = "0xf22::asset::USDC";
pub const WETH: &str = "0xf22::asset::WETH";

#[derive(Default)]
pub struct MockLedger {
    endpoint: String,
    accounts: Mutex<HashMap<String, Vec<RawResource>>>,
    failing_types: Mutex<HashSet<String>>,
    fail_all: AtomicBool,
    calls: AtomicUsize,
    gate: Mutex<Option<Arc<Barrier>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::with_endpoint("mock://ledger")
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn insert(&self, address: &str, resource_type: &str, data: Value) {
        self.accounts
            .lock()
            .entry(address.to_string())
            .or_default()
            .push(RawResource::new(resource_type, data));
    }

    /// Every request fails with an RPC error while set.
    pub fn fail_requests(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Single-resource requests for `resource_type` fail with an RPC error.
    pub fn fail_type(&self, resource_type: &str) {
        self.failing_types.lock().insert(resource_type.to_string());
    }

    /// Single-resource requests wait on `barrier` before answering, so none
    /// completes until the barrier's count of waiters is reached.
    pub fn gate_resource_requests(&self, barrier: Arc<Barrier>) {
        *self.gate.lock() = Some(barrier);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::Rpc("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_account_resources(&self, address: &str) -> Result<Vec<RawResource>> {
        self.begin()?;
        self.accounts
            .lock()
            .get(address)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("account {}", address)))
    }

    async fn get_account_resource(&self, address: &str, resource_type: &str) -> Result<RawResource> {
        self.begin()?;
        let gate = self.gate.lock().clone();
        if let Some(barrier) = gate {
            barrier.wait().await;
        }
        if self.failing_types.lock().contains(resource_type) {
            return Err(AppError::Rpc(format!("{} timed out", resource_type)));
        }
        self.accounts
            .lock()
            .get(address)
            .and_then(|resources| {
                resources
                    .iter()
                    .find(|r| r.resource_type == resource_type)
                    .cloned()
            })
            .ok_or_else(|| AppError::NotFound(format!("{} of {}", resource_type, address)))
    }
}

/// Connection manager whose every client handle is `ledger`.
pub fn manager_for(ledger: Arc<MockLedger>) -> Arc<ConnectionManager> {
    let factory: ClientFactory =
        Arc::new(move |_endpoint: &str| Arc::clone(&ledger) as Arc<dyn LedgerClient>);
    Arc::new(ConnectionManager::with_client_factory(
        ConnectionConfig::default(),
        factory,
    ))
}
