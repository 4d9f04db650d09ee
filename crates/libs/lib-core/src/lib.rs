//! # Core Library
//!
//! Error type and environment-driven configuration shared by the ledger sync crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
