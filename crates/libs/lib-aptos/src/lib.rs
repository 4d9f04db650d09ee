//! # Aptos Sync Library
//!
//! Reads account resources from an Aptos node and derives the state a swap UI
//! shows: coin balances, LP balances, pair reserves and coin metadata.

pub mod client;
pub mod connection;
pub mod network;
pub mod pair;
pub mod registrar;
pub mod resources;
pub mod sdk;
pub mod state;
pub mod store;
pub mod sync;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types from root for convenience
pub use client::{AptosClient, LedgerClient};
pub use connection::ConnectionManager;
pub use network::{ConnectionConfig, ConnectionType, NetworkType, SupportedChainId};
pub use pair::{PairLookup, PairResolver};
pub use registrar::CoinRegistrar;
pub use resources::ResourceAccessor;
pub use sdk::SwapSdk;
pub use state::AptosState;
pub use store::{CacheStore, MemoryStore};
pub use sync::ResourceSynchronizer;
pub use types::{BalanceSnapshot, CoinMetadata, Lookup, Pair, RawResource};
