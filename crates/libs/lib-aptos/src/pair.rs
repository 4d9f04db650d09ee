//! # Pair Resolver
//!
//! Derives a liquidity pair's reserves and LP supply from two resources of the
//! protocol's resource account:
//!
//! - `CoinInfo<LPCoin<X, Y>>` → total LP supply
//! - `LiquidityPool<X, Y>` → both reserves
//!
//! Both are fetched concurrently and joined. Pair order matters: `(X, Y)` and
//! `(Y, X)` compose different type strings and resolve independently.
//!
//! The result is published to the store's single current-pair slot, which each
//! resolution overwrites (or clears).

use crate::connection::ConnectionManager;
use crate::resources::ResourceAccessor;
use crate::sdk::type_utils::{compose_lp, compose_lp_coin, compose_type};
use crate::store::CacheStore;
use crate::types::{CoinInfoResource, Lookup, LiquidityPoolResource, Pair};
use lib_core::{AppError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of [`PairResolver::get_pair`].
///
/// - `Found` - the pair exists and was published
/// - `NotFound` - the pair does not exist on-chain; the slot was cleared
/// - `Failed` - existence is unknown (bad input, fetch or parse failure)
pub type PairLookup = Lookup<Pair>;

pub struct PairResolver {
    connection: Arc<ConnectionManager>,
    accessor: Arc<ResourceAccessor>,
    store: Arc<dyn CacheStore>,
}

impl PairResolver {
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

    /// Resolve the ordered pair `(coin_x, coin_y)` and publish it.
    pub async fn get_pair(&self, coin_x: &str, coin_y: &str) -> PairLookup {
        if coin_x.is_empty() || coin_y.is_empty() {
            return Lookup::Failed(AppError::InvalidInput(
                "both coin types are required".to_string(),
            ));
        }

        let sdk = self.connection.get_sdk();
        let modules = sdk.modules();
        let resource_account = modules.resource_account_address.as_str();

        let lp_coin = compose_lp_coin(resource_account, coin_x, coin_y);
        let coin_info_type = compose_type(&modules.coin_info, &[&lp_coin]);
        let pool_type = compose_lp(&modules.scripts, coin_x, coin_y);

        let (coin_info, pool) = tokio::join!(
            self.accessor.lookup_account_resource(resource_account, &coin_info_type),
            self.accessor.lookup_account_resource(resource_account, &pool_type),
        );

        match assemble_pair(coin_x, coin_y, coin_info, pool) {
            Ok(Some(pair)) => {
                debug!(
                    "Pair {} / {}: lp_total={} reserves=({}, {})",
                    coin_x, coin_y, pair.lp_total, pair.coin_x_reserve, pair.coin_y_reserve
                );
                self.store.set_current_pair(Some(pair.clone()));
                Lookup::Found(pair)
            }
            Ok(None) => {
                debug!("Pair {} / {} does not exist", coin_x, coin_y);
                self.store.set_current_pair(None);
                Lookup::NotFound
            }
            Err(e) => {
                warn!(kind = e.kind(), "Pair {} / {} unavailable: {}", coin_x, coin_y, e);
                self.store.set_current_pair(None);
                Lookup::Failed(e)
            }
        }
    }
}

/// Combine the two joined fetches.
///
/// A failed fetch wins over a missing one: if either side is unknown the pair's
/// existence is unknown. Otherwise a missing side means the pair does not exist.
fn assemble_pair(
    coin_x: &str,
    coin_y: &str,
    coin_info: Lookup<Value>,
    pool: Lookup<Value>,
) -> Result<Option<Pair>> {
    let (coin_info, pool) = match (coin_info, pool) {
        (Lookup::Failed(e), _) | (_, Lookup::Failed(e)) => return Err(e),
        (Lookup::Found(coin_info), Lookup::Found(pool)) => (coin_info, pool),
        _ => return Ok(None),
    };

    let coin_info: CoinInfoResource = serde_json::from_value(coin_info)?;
    let pool: LiquidityPoolResource = serde_json::from_value(pool)?;

    Ok(Some(Pair {
        coin_x: coin_x.to_string(),
        coin_y: coin_y.to_string(),
        lp_total: coin_info.total_supply()?,
        coin_x_reserve: pool.coin_x_reserve.value,
        coin_y_reserve: pool.coin_y_reserve.value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkType;
    use crate::sdk::Modules;
    use crate::store::MemoryStore;
    use crate::testing::{manager_for, MockLedger, APT, USDC};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Barrier;
    use tokio::time::timeout;

    struct Fixture {
        ledger: Arc<MockLedger>,
        store: Arc<MemoryStore>,
        resolver: PairResolver,
        modules: Modules,
    }

    fn fixture() -> Fixture {
        let ledger = Arc::new(MockLedger::new());
        let connection = manager_for(Arc::clone(&ledger));
        let store = Arc::new(MemoryStore::new());
        let accessor = Arc::new(ResourceAccessor::new(Arc::clone(&connection)));
        let resolver = PairResolver::new(connection, accessor, store.clone());
        Fixture {
            ledger,
            store,
            resolver,
            modules: Modules::for_network(NetworkType::Mainnet),
        }
    }

    impl Fixture {
        fn coin_info_type(&self, x: &str, y: &str) -> String {
            let lp_coin = compose_lp_coin(&self.modules.resource_account_address, x, y);
            compose_type(&self.modules.coin_info, &[&lp_coin])
        }

        fn pool_type(&self, x: &str, y: &str) -> String {
            compose_lp(&self.modules.scripts, x, y)
        }

        fn add_lp_coin_info(&self, x: &str, y: &str, supply: &str) {
            self.ledger.insert(
                &self.modules.resource_account_address,
                &self.coin_info_type(x, y),
                json!({
                    "name": "AnimeSwapLPCoin",
                    "symbol": "ANILPCoin",
                    "decimals": 8,
                    "supply": { "vec": [ {
                        "aggregator": { "vec": [] },
                        "integer": { "vec": [ { "limit": "340282366920938463463374607431768211455", "value": supply } ] }
                    } ] }
                }),
            );
        }

        fn add_pool(&self, x: &str, y: &str, reserve_x: &str, reserve_y: &str) {
            self.ledger.insert(
                &self.modules.resource_account_address,
                &self.pool_type(x, y),
                json!({
                    "coin_x_reserve": { "value": reserve_x },
                    "coin_y_reserve": { "value": reserve_y },
                    "lp_coin_reserve": { "value": "0" },
                    "locked": false
                }),
            );
        }

        fn stale_pair(&self) {
            self.store.set_current_pair(Some(Pair {
                coin_x: "stale".to_string(),
                coin_y: "stale".to_string(),
                lp_total: 1,
                coin_x_reserve: 1,
                coin_y_reserve: 1,
            }));
        }
    }

    #[tokio::test]
    async fn test_pair_found_and_published() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "1000");
        f.add_pool(APT, USDC, "4000", "250");

        let pair = f.resolver.get_pair(APT, USDC).await.found().unwrap();
        assert_eq!(pair.coin_x, APT);
        assert_eq!(pair.coin_y, USDC);
        assert_eq!(pair.lp_total, 1000);
        assert_eq!(pair.coin_x_reserve, 4000);
        assert_eq!(pair.coin_y_reserve, 250);
        assert_eq!(f.store.current_pair(), Some(pair));
        assert_eq!(f.ledger.calls(), 2);
    }

    #[tokio::test]
    async fn test_both_fetches_in_flight_together() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "1000");
        f.add_pool(APT, USDC, "4000", "250");
        // Neither fetch answers until both have been issued.
        f.ledger.gate_resource_requests(Arc::new(Barrier::new(2)));

        let lookup = timeout(Duration::from_secs(5), f.resolver.get_pair(APT, USDC))
            .await
            .expect("coin-info and pool fetches were not issued concurrently");
        assert_eq!(lookup.found().unwrap().lp_total, 1000);
        assert_eq!(f.ledger.calls(), 2);
    }

    #[tokio::test]
    async fn test_reversed_order_resolves_independently() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "1000");
        f.add_pool(APT, USDC, "4000", "250");

        assert!(f.resolver.get_pair(APT, USDC).await.is_found());
        // Only (APT, USDC) exists on-chain.
        assert!(f.resolver.get_pair(USDC, APT).await.is_not_found());

        // With fixtures for both compositions both resolve, each to its own data.
        f.add_lp_coin_info(USDC, APT, "1000");
        f.add_pool(USDC, APT, "250", "4000");
        let forward = f.resolver.get_pair(APT, USDC).await.found().unwrap();
        let reverse = f.resolver.get_pair(USDC, APT).await.found().unwrap();
        assert_eq!(forward.coin_x_reserve, reverse.coin_y_reserve);
        assert_eq!(reverse.coin_x, USDC);
        assert_eq!(f.store.current_pair(), Some(reverse));
    }

    #[tokio::test]
    async fn test_half_present_pair_is_not_found() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "1000");
        f.stale_pair();

        assert!(f.resolver.get_pair(APT, USDC).await.is_not_found());
        assert_eq!(f.store.current_pair(), None);

        let g = fixture();
        g.add_pool(APT, USDC, "4000", "250");
        assert!(g.resolver.get_pair(APT, USDC).await.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_failed_not_not_found() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "1000");
        f.add_pool(APT, USDC, "4000", "250");
        f.ledger.fail_type(&f.pool_type(APT, USDC));
        f.stale_pair();

        let lookup = f.resolver.get_pair(APT, USDC).await;
        assert!(lookup.is_failed());
        assert_eq!(f.store.current_pair(), None);

        f.ledger.fail_requests(true);
        assert!(f.resolver.get_pair(APT, USDC).await.is_failed());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_failed() {
        let f = fixture();
        f.add_lp_coin_info(APT, USDC, "not-a-number");
        f.add_pool(APT, USDC, "4000", "250");
        f.stale_pair();

        assert!(f.resolver.get_pair(APT, USDC).await.is_failed());
        assert_eq!(f.store.current_pair(), None);
    }

    #[tokio::test]
    async fn test_empty_coin_rejected_without_io() {
        let f = fixture();
        assert!(f.resolver.get_pair("", USDC).await.is_failed());
        assert!(f.resolver.get_pair(APT, "").await.is_failed());
        assert_eq!(f.ledger.calls(), 0);
    }
}
