//! # Shared Cache Store
//!
//! The sink derived state is published into. The sync engine only ever
//! writes; the UI side reads.
//!
//! ## Channels
//!
//! | Channel | Write semantics |
//! |---|---|
//! | coin + LP balances | [`CacheStore::publish_balances`], replaces both maps in one write |
//! | coin balances | [`CacheStore::merge_coin_balance`], upserts a single key |
//! | current pair | [`CacheStore::set_current_pair`], replaces or clears the slot |
//! | coin registry | [`CacheStore::upsert_coin`], additive, never cleared |
//!
//! Writes carry no version: when two publishes race, the last one to land wins.
//!
//! ## Example
//! ```
//! use lib_aptos::store::{CacheStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.merge_coin_balance("0x1::aptos_coin::AptosCoin", 500);
//! assert_eq!(store.coin_balances().get("0x1::aptos_coin::AptosCoin"), Some(&500));
//! ```

use crate::types::{BalanceSnapshot, CoinBalanceMap, CoinMetadata, LpBalanceMap, Pair};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Write-only publish target for derived ledger state.
pub trait CacheStore: Send + Sync {
    /// Replace coin and LP balance maps together.
    fn publish_balances(&self, snapshot: BalanceSnapshot);

    /// Upsert one coin balance, keeping every other entry.
    fn merge_coin_balance(&self, coin_type: &str, amount: u128);

    /// Replace (`Some`) or clear (`None`) the current-pair slot.
    fn set_current_pair(&self, pair: Option<Pair>);

    /// Add or update a coin registry entry, keyed by address.
    fn upsert_coin(&self, coin: CoinMetadata);
}

/// Thread-safe in-process store.
///
/// Each channel sits behind its own read-write lock; the balance snapshot is a
/// single value so both maps always change together.
#[derive(Default)]
pub struct MemoryStore {
    balances: RwLock<BalanceSnapshot>,
    current_pair: RwLock<Option<Pair>>,
    coins: RwLock<HashMap<String, CoinMetadata>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coin and LP maps as of the same write.
    pub fn balances(&self) -> BalanceSnapshot {
        self.balances.read().clone()
    }

    pub fn coin_balances(&self) -> CoinBalanceMap {
        self.balances.read().coin_balances.clone()
    }

    pub fn lp_balances(&self) -> LpBalanceMap {
        self.balances.read().lp_balances.clone()
    }

    pub fn current_pair(&self) -> Option<Pair> {
        self.current_pair.read().clone()
    }

    pub fn coin(&self, address: &str) -> Option<CoinMetadata> {
        self.coins.read().get(address).cloned()
    }

    pub fn coins(&self) -> Vec<CoinMetadata> {
        let mut coins: Vec<_> = self.coins.read().values().cloned().collect();
        coins.sort_by(|a, b| a.address.cmp(&b.address));
        coins
    }
}

impl CacheStore for MemoryStore {
    fn publish_balances(&self, snapshot: BalanceSnapshot) {
        debug!(
            "Publishing {} coin / {} LP balances",
            snapshot.coin_balances.len(),
            snapshot.lp_balances.len()
        );
        *self.balances.write() = snapshot;
    }

    fn merge_coin_balance(&self, coin_type: &str, amount: u128) {
        self.balances
            .write()
            .coin_balances
            .insert(coin_type.to_string(), amount);
    }

    fn set_current_pair(&self, pair: Option<Pair>) {
        *self.current_pair.write() = pair;
    }

    fn upsert_coin(&self, coin: CoinMetadata) {
        self.coins.write().insert(coin.address.clone(), coin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(address: &str, symbol: &str) -> CoinMetadata {
        CoinMetadata {
            address: address.to_string(),
            decimals: 8,
            symbol: symbol.to_string(),
            name: symbol.to_string(),
        }
    }

    #[test]
    fn test_publish_replaces_merge_keeps() {
        let store = MemoryStore::new();
        store.merge_coin_balance("A", 1);
        store.merge_coin_balance("B", 2);
        store.merge_coin_balance("A", 3);
        assert_eq!(store.coin_balances().len(), 2);
        assert_eq!(store.coin_balances()["A"], 3);

        let mut snapshot = BalanceSnapshot::default();
        snapshot.coin_balances.insert("C".to_string(), 9);
        store.publish_balances(snapshot);
        assert_eq!(store.coin_balances().len(), 1);
        assert!(store.lp_balances().is_empty());
    }

    #[test]
    fn test_coin_registry_is_additive() {
        let store = MemoryStore::new();
        store.upsert_coin(coin("0x1::a::A", "A"));
        store.upsert_coin(coin("0x2::b::B", "B"));
        store.upsert_coin(coin("0x1::a::A", "A2"));

        let coins = store.coins();
        assert_eq!(coins.len(), 2);
        assert_eq!(store.coin("0x1::a::A").unwrap().symbol, "A2");
    }

    #[test]
    fn test_current_pair_slot() {
        let store = MemoryStore::new();
        let pair = Pair {
            coin_x: "X".to_string(),
            coin_y: "Y".to_string(),
            lp_total: 10,
            coin_x_reserve: 20,
            coin_y_reserve: 30,
        };
        store.set_current_pair(Some(pair.clone()));
        assert_eq!(store.current_pair(), Some(pair));
        store.set_current_pair(None);
        assert_eq!(store.current_pair(), None);
    }
}
