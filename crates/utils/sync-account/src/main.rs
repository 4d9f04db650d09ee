//! # Sync Account Utility
//!
//! Reads an account's resources from the configured Aptos node and prints the
//! balances and pair state the sync engine derives from them.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package sync-account --bin sync_account -- <account> [coin-address...]
//! ```
//!
//! The program will:
//! 1. Load `.env` and the `APTOS_*` configuration
//! 2. Sync every resource of `<account>`
//! 3. Wait for the LP pairs discovered during the sync to resolve
//! 4. Register each extra `coin-address` argument
//! 5. Print coin balances, LP balances, the current pair and registered coins

use lib_aptos::{AptosState, MemoryStore};
use lib_core::config::{core_config, init_config};
use lib_utils::validate_account_address;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(account) = args.next() else {
        anyhow::bail!("usage: sync_account <account> [coin-address...]");
    };
    validate_account_address(&account).map_err(anyhow::Error::msg)?;
    let coin_addresses: Vec<String> = args.collect();

    init_config()?;
    let config = core_config();

    let store = Arc::new(MemoryStore::new());
    let state = AptosState::from_config(config, store.clone())?;

    println!("============================================");
    println!("  Account Sync");
    println!("============================================");
    println!("Node:    {}", state.connection.get_client().endpoint());
    println!("Account: {}", account);
    println!();

    if state.sync.sync_account_resources(&account).await.is_none() {
        warn!("Sync of {} produced no data; balances were cleared", account);
        println!("Sync failed; balances were cleared. See the log for details.");
        return Ok(());
    }
    state.sync.wait_pair_tasks().await;
    info!("Pair resolution finished for {}", account);

    for address in &coin_addresses {
        state.coins.add_coin(address).await;
    }

    let balances = store.balances();

    let mut coins: Vec<_> = balances.coin_balances.iter().collect();
    coins.sort();
    println!("Coin balances ({}):", coins.len());
    for (coin_type, amount) in coins {
        println!("  {:>24}  {}", amount, coin_type);
    }
    println!();

    let mut lps: Vec<_> = balances.lp_balances.iter().collect();
    lps.sort();
    println!("LP balances ({}):", lps.len());
    for (pair, amount) in lps {
        println!("  {:>24}  {}", amount, pair);
    }
    println!();

    match store.current_pair() {
        Some(pair) => {
            println!("Current pair: {} / {}", pair.coin_x, pair.coin_y);
            println!("  LP supply: {}", pair.lp_total);
            println!("  Reserves:  {} / {}", pair.coin_x_reserve, pair.coin_y_reserve);
        }
        None => println!("Current pair: none"),
    }

    let registered = store.coins();
    if !registered.is_empty() {
        println!();
        println!("Registered coins ({}):", registered.len());
        for coin in registered {
            println!("  {} ({}, {} decimals) {}", coin.symbol, coin.name, coin.decimals, coin.address);
        }
    }

    Ok(())
}
