//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables, with optional
//! fallbacks for settings that have a sensible default.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an environment variable, falling back to `default` when it is unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match get_env(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Get and parse an environment variable, falling back to `default` when it is unset.
///
/// A variable that is set but does not parse is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env(name) {
        Ok(val) if !val.trim().is_empty() => {
            val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
        }
        _ => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_falls_back() {
        let value = get_env_or("LIB_UTILS_TEST_SURELY_UNSET_VAR", "aptos");
        assert_eq!(value, "aptos");

        let parsed: u64 = get_env_parse_or("LIB_UTILS_TEST_SURELY_UNSET_VAR", 10).unwrap();
        assert_eq!(parsed, 10);
    }

    #[test]
    fn test_missing_env_is_error() {
        let err = get_env("LIB_UTILS_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert_eq!(err, Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET_VAR"));
        assert!(err.to_string().contains("must be set"));
    }
}
