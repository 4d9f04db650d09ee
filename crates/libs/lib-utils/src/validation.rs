//! # Validation Utilities
//!
//! Input validation helpers for account addresses and Move type strings.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate an account address (`0x` followed by 1-64 hex digits).
pub fn validate_account_address(address: &str) -> Result<(), String> {
    let hex = address
        .strip_prefix("0x")
        .ok_or_else(|| format!("Account address must start with 0x: {}", address))?;

    if hex.is_empty() || hex.len() > 64 {
        return Err(format!("Account address must have 1 to 64 hex digits: {}", address));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Account address contains non-hex characters: {}", address));
    }
    Ok(())
}
