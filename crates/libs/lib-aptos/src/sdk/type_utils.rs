//! # Move Type String Utilities
//!
//! Composition and prefix/suffix extraction of the type strings the swap
//! protocol uses. These are the only bit-exact formats in the crate:
//!
//! ```text
//! <CoinStore><<CoinType>>                          0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>
//! <ResourceAccount>::LPCoinV1::LPCoin<<X>, <Y>>    LP coin of the ordered pair (X, Y)
//! <Scripts>::LiquidityPool<<X>, <Y>>               pool resource of the ordered pair (X, Y)
//! <CoinInfo><<CoinType>>                           0x1::coin::CoinInfo<...>
//! ```
//!
//! Extraction is deliberately shallow: a prefix is stripped, the outer `<`/`>`
//! removed, and generic arguments split at top-level `", "` only.

use lib_core::{AppError, Result};

/// `address<G1, G2, ...>`
pub fn compose_type(address: &str, generics: &[&str]) -> String {
    format!("{}<{}>", address, generics.join(", "))
}

/// `coin_store<coin_type>`
pub fn compose_coin_store(coin_store: &str, coin_type: &str) -> String {
    compose_type(coin_store, &[coin_type])
}

/// LP coin namespace under the resource account: `<address>::LPCoinV1::LPCoin`.
pub fn compose_lp_coin_type(resource_account: &str) -> String {
    format!("{}::LPCoinV1::LPCoin", resource_account)
}

/// LP coin type of the ordered pair.
pub fn compose_lp_coin(resource_account: &str, coin_x: &str, coin_y: &str) -> String {
    compose_type(&compose_lp_coin_type(resource_account), &[coin_x, coin_y])
}

/// Pool resource type of the ordered pair.
pub fn compose_lp(scripts: &str, coin_x: &str, coin_y: &str) -> String {
    compose_type(&format!("{}::LiquidityPool", scripts), &[coin_x, coin_y])
}

/// Inner generic text of `prefix<...>`.
///
/// Returns `None` when `type_str` is not an instantiation of `prefix`, and an
/// error when it starts like one but is not closed.
pub fn strip_generic<'a>(type_str: &'a str, prefix: &str) -> Result<Option<&'a str>> {
    let Some(rest) = type_str
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('<'))
    else {
        return Ok(None);
    };

    rest.strip_suffix('>')
        .map(Some)
        .ok_or_else(|| AppError::Decoding(format!("Unterminated generic type: {}", type_str)))
}

/// Split generic arguments at top-level `", "`.
///
/// `"A, B<C, D>"` → `["A", "B<C, D>"]`.
pub fn split_type_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = args.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

/// Split an LP pair encoding into `(coin_x, coin_y)`.
pub fn split_pair(lp_pair: &str) -> Result<(&str, &str)> {
    match split_type_args(lp_pair).as_slice() {
        [coin_x, coin_y] if !coin_x.is_empty() && !coin_y.is_empty() => Ok((coin_x, coin_y)),
        _ => Err(AppError::Decoding(format!("Not a coin pair: {}", lp_pair))),
    }
}
