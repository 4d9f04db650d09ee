//! # Aptos Resource Type Definitions
//!
//! Data structures shared by the ledger client, the synchronizer and the
//! cache store.
//!
//! ## Type Categories
//!
//! ### Raw ledger data
//! - `RawResource`: one entry of an account's resource list (`type` + opaque `data`)
//!
//! ### Typed resource payloads
//! - `CoinStoreResource`: `0x1::coin::CoinStore<T>` (an account's balance of `T`)
//! - `CoinInfoResource`: `0x1::coin::CoinInfo<T>` (decimals, symbol, supply)
//! - `LiquidityPoolResource`: the swap protocol's pool (both reserves)
//!
//! ### Derived state
//! - `BalanceSnapshot`: coin and LP balance maps published together
//! - `Pair`: reserves and LP supply of one ordered coin pair
//! - `CoinMetadata`: registry entry for a coin
//!
//! ### Outcomes
//! - `Lookup<T>`: found / not found / failed
//!
//! On-chain `u64`/`u128` amounts arrive as JSON strings (`"500"`); they are
//! decoded into `u128`.
//!
//! ## Example
//!
//! ```rust
//! use lib_aptos::types::{CoinStoreResource, RawResource};
//! use serde_json::json;
//!
//! let resource: RawResource = serde_json::from_value(json!({
//!     "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>",
//!     "data": { "coin": { "value": "500" } }
//! })).unwrap();
//!
//! let store: CoinStoreResource = resource.decode().unwrap();
//! assert_eq!(store.coin.value, 500);
//! ```

use lib_core::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Coin type string → balance.
pub type CoinBalanceMap = HashMap<String, u128>;

/// LP pair encoding (`"CoinX, CoinY"`) → LP coin balance.
pub type LpBalanceMap = HashMap<String, u128>;

/// One resource from an account's resource list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: Value,
}

impl RawResource {
    pub fn new(resource_type: impl Into<String>, data: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            data,
        }
    }

    /// Decode the payload into a typed resource.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| {
            AppError::Decoding(format!("Invalid {} payload: {}", self.resource_type, e))
        })
    }
}

/// Accepts both `"123"` and `123` for on-chain integers.
fn de_u128<'de, D>(deserializer: D) -> std::result::Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Num(u64),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
        Repr::Num(n) => Ok(n as u128),
    }
}

/// A coin amount wrapper (`{"value": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoinValue {
    #[serde(deserialize_with = "de_u128")]
    pub value: u128,
}

/// `0x1::coin::CoinStore<T>` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinStoreResource {
    pub coin: CoinValue,
}

/// Move `Option<T>`, serialized as a vector of zero or one element.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveOption<T> {
    pub vec: Vec<T>,
}

impl<T> MoveOption<T> {
    pub fn first(&self) -> Option<&T> {
        self.vec.first()
    }
}

/// Non-parallelizable supply counter.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplyInteger {
    #[serde(deserialize_with = "de_u128")]
    pub value: u128,
}

/// `OptionalAggregator`: supply is tracked either by an aggregator or an integer.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalAggregator {
    pub integer: MoveOption<SupplyInteger>,
}

/// `0x1::coin::CoinInfo<T>` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinInfoResource {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: MoveOption<OptionalAggregator>,
}

impl CoinInfoResource {
    /// Total supply from `supply.vec[0].integer.vec[0].value`.
    pub fn total_supply(&self) -> Result<u128> {
        self.supply
            .first()
            .and_then(|aggregator| aggregator.integer.first())
            .map(|integer| integer.value)
            .ok_or_else(|| {
                AppError::Decoding(format!("CoinInfo for {} has no integer supply", self.symbol))
            })
    }
}

/// Swap protocol `LiquidityPool<X, Y>` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityPoolResource {
    pub coin_x_reserve: CoinValue,
    pub coin_y_reserve: CoinValue,
}

/// Coin and LP balances derived from one resource fetch.
///
/// Always published as a unit so readers never see one map updated and the
/// other stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub coin_balances: CoinBalanceMap,
    pub lp_balances: LpBalanceMap,
}

impl BalanceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.coin_balances.is_empty() && self.lp_balances.is_empty()
    }
}

/// Derived state of one liquidity pool, addressed by an ordered coin pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub coin_x: String,
    pub coin_y: String,
    pub lp_total: u128,
    pub coin_x_reserve: u128,
    pub coin_y_reserve: u128,
}

/// Coin registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinMetadata {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

/// Outcome of a lookup that must tell "does not exist" apart from "could not tell".
#[derive(Debug)]
pub enum Lookup<T> {
    /// The value exists.
    Found(T),
    /// The ledger answered: there is no such record.
    NotFound,
    /// Input was invalid or the fetch failed; existence is unknown.
    Failed(AppError),
}

impl<T> Lookup<T> {
    /// Map a fetch result, turning `AppError::NotFound` into [`Lookup::NotFound`].
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Lookup::Found(value),
            Err(e) if e.is_not_found() => Lookup::NotFound,
            Err(e) => Lookup::Failed(e),
        }
    }

    /// Collapse to an option: both `NotFound` and `Failed` become `None`.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coin_store_amounts_accept_strings_and_numbers() {
        let store: CoinStoreResource =
            serde_json::from_value(json!({ "coin": { "value": "340282366920938463463374607431768211455" } }))
                .unwrap();
        assert_eq!(store.coin.value, u128::MAX);

        let store: CoinStoreResource =
            serde_json::from_value(json!({ "coin": { "value": 42 } })).unwrap();
        assert_eq!(store.coin.value, 42);

        assert!(serde_json::from_value::<CoinStoreResource>(json!({ "coin": { "value": "abc" } })).is_err());
    }

    #[test]
    fn test_coin_info_total_supply() {
        let info: CoinInfoResource = serde_json::from_value(json!({
            "name": "LPCoin",
            "symbol": "LP",
            "decimals": 8,
            "supply": { "vec": [ {
                "aggregator": { "vec": [] },
                "integer": { "vec": [ { "limit": "340282366920938463463374607431768211455", "value": "1000" } ] }
            } ] }
        }))
        .unwrap();
        assert_eq!(info.total_supply().unwrap(), 1000);

        let untracked: CoinInfoResource = serde_json::from_value(json!({
            "name": "Coin", "symbol": "C", "decimals": 6, "supply": { "vec": [] }
        }))
        .unwrap();
        assert!(matches!(untracked.total_supply(), Err(AppError::Decoding(_))));
    }

    #[test]
    fn test_lookup_from_result() {
        assert!(Lookup::from_result(Ok(1)).is_found());
        assert!(Lookup::<u8>::from_result(Err(AppError::NotFound("x".into()))).is_not_found());
        assert!(Lookup::<u8>::from_result(Err(AppError::Rpc("x".into()))).is_failed());
        assert_eq!(Lookup::<u8>::from_result(Err(AppError::Rpc("x".into()))).found(), None);
    }

    #[test]
    fn test_raw_resource_decode_error_names_type() {
        let resource = RawResource::new("0x1::coin::CoinStore<0x1::a::A>", json!({ "coin": {} }));
        let err = resource.decode::<CoinStoreResource>().unwrap_err();
        assert!(err.to_string().contains("0x1::coin::CoinStore<0x1::a::A>"));
    }
}
