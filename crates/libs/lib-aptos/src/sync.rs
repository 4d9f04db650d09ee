//! # Resource Synchronizer
//!
//! Turns an account's full resource list into coin and LP balance maps.
//!
//! ## Classification
//!
//! ```text
//! 0x1::coin::CoinStore<T>                      → coin_balances[T]
//! 0x1::coin::CoinStore<<RA>::LPCoinV1::LPCoin<X, Y>>
//!                                              → coin_balances[LPCoin<X, Y>]
//!                                              → lp_balances["X, Y"]
//!                                              → pair (X, Y) resolved in the background
//! anything else                                → ignored
//! ```
//!
//! ## Failure Policy
//!
//! A sync is all-or-nothing. If the fetch fails or any coin-store resource
//! cannot be parsed, both maps are published **empty** rather than left
//! holding the previous (possibly wrong) values, and the caller gets `None`.

use crate::connection::ConnectionManager;
use crate::pair::PairResolver;
use crate::resources::ResourceAccessor;
use crate::sdk::type_utils::{compose_coin_store, split_pair, strip_generic};
use crate::sdk::Modules;
use crate::store::CacheStore;
use crate::types::{BalanceSnapshot, CoinStoreResource, RawResource};
use lib_core::Result;
use lib_utils::validate_not_empty;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Balances plus the LP pairs discovered while classifying.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub snapshot: BalanceSnapshot,
    pub pairs: Vec<(String, String)>,
}

/// Classify a resource set against the protocol's module table.
///
/// Fails on the first malformed coin-store resource; partial progress is dropped.
pub fn classify_resources(resources: &[RawResource], modules: &Modules) -> Result<Classification> {
    let lp_namespace = modules.lp_coin_namespace();
    let mut classification = Classification::default();

    for resource in resources {
        let Some(coin_type) = strip_generic(&resource.resource_type, &modules.coin_store)? else {
            continue;
        };
        let balance = resource.decode::<CoinStoreResource>()?.coin.value;
        classification
            .snapshot
            .coin_balances
            .insert(coin_type.to_string(), balance);

        if let Some(lp_pair) = strip_generic(coin_type, &lp_namespace)? {
            let (coin_x, coin_y) = split_pair(lp_pair)?;
            classification
                .snapshot
                .lp_balances
                .insert(lp_pair.to_string(), balance);
            classification
                .pairs
                .push((coin_x.to_string(), coin_y.to_string()));
        }
    }

    Ok(classification)
}

pub struct ResourceSynchronizer {
    connection: Arc<ConnectionManager>,
    accessor: Arc<ResourceAccessor>,
    pairs: Arc<PairResolver>,
    store: Arc<dyn CacheStore>,
    pair_tasks: Mutex<JoinSet<()>>,
}

impl ResourceSynchronizer {
    pub fn new(
        connection: Arc<ConnectionManager>,
        accessor: Arc<ResourceAccessor>,
        pairs: Arc<PairResolver>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            connection,
            accessor,
            pairs,
            store,
            pair_tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Fetch and classify every resource of `account`, replacing the published
    /// coin and LP maps.
    ///
    /// Returns the raw resources on success. On failure both maps are cleared
    /// and `None` is returned. An empty account is rejected without I/O and
    /// without touching the store.
    ///
    /// Each LP pair found is resolved in a background task that this call does
    /// not wait for (see [`Self::wait_pair_tasks`]). A failed sync starts no
    /// pair resolution at all.
    pub async fn sync_account_resources(&self, account: &str) -> Option<Vec<RawResource>> {
        if let Err(e) = validate_not_empty(account, "account") {
            debug!("Skipping sync: {}", e);
            return None;
        }

        match self.fetch_and_classify(account).await {
            Ok((resources, classification)) => {
                info!(
                    "Synced {}: {} resources, {} coin balances, {} LP balances",
                    account,
                    resources.len(),
                    classification.snapshot.coin_balances.len(),
                    classification.snapshot.lp_balances.len()
                );
                for (coin_x, coin_y) in classification.pairs {
                    self.spawn_pair_resolution(coin_x, coin_y);
                }
                self.store.publish_balances(classification.snapshot);
                Some(resources)
            }
            Err(e) => {
                warn!(kind = e.kind(), "Sync of {} failed, clearing balances: {}", account, e);
                self.store.publish_balances(BalanceSnapshot::default());
                None
            }
        }
    }

    async fn fetch_and_classify(&self, account: &str) -> Result<(Vec<RawResource>, Classification)> {
        let resources = self.accessor.get_account_resources(account).await?;
        let sdk = self.connection.get_sdk();
        let classification = classify_resources(&resources, sdk.modules())?;
        Ok((resources, classification))
    }

    /// Balance of a single coin, merged into the published coin map.
    ///
    /// Unlike a full sync this keeps every other entry of the map, and leaves
    /// the store untouched when the lookup fails.
    pub async fn get_coin_balance(&self, account: &str, coin_type: &str) -> Option<u128> {
        if account.is_empty() || coin_type.is_empty() {
            return None;
        }

        let sdk = self.connection.get_sdk();
        let store_type = compose_coin_store(&sdk.modules().coin_store, coin_type);
        let data = self.accessor.get_account_resource(account, &store_type).await?;

        match serde_json::from_value::<CoinStoreResource>(data) {
            Ok(coin_store) => {
                let amount = coin_store.coin.value;
                debug!("Balance of {} for {}: {}", coin_type, account, amount);
                self.store.merge_coin_balance(coin_type, amount);
                Some(amount)
            }
            Err(e) => {
                debug!("Malformed coin store {} of {}: {}", store_type, account, e);
                None
            }
        }
    }

    /// Wait for every pair resolution spawned by earlier syncs.
    pub async fn wait_pair_tasks(&self) {
        let mut tasks = std::mem::take(&mut *self.pair_tasks.lock());
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!("Pair resolution task failed: {}", e);
            }
        }
    }

    fn spawn_pair_resolution(&self, coin_x: String, coin_y: String) {
        let pairs = Arc::clone(&self.pairs);
        let mut tasks = self.pair_tasks.lock();
        // Reap finished tasks so the set does not grow across syncs.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            pairs.get_pair(&coin_x, &coin_y).await;
        });
    }
}
