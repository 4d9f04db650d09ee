//! # Aptos RPC Client
//!
//! Provides the [`LedgerClient`] seam used by every component that reads
//! on-chain state, and [`AptosClient`], its implementation over the Aptos
//! fullnode REST API.
//!
//! ## Endpoints
//!
//! - `GET {base}/accounts/{address}/resources` - every resource of an account
//! - `GET {base}/accounts/{address}/resource/{type}` - one resource by type
//!
//! ## Error Mapping
//!
//! - HTTP 404 → [`AppError::NotFound`] (account or resource does not exist)
//! - any other non-success status, connection failure or timeout → [`AppError::Rpc`]
//! - an unparseable body → [`AppError::Decoding`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_aptos::client::{AptosClient, LedgerClient};
//!
//! # async fn example() -> lib_core::Result<()> {
//! let client = AptosClient::new("https://fullnode.mainnet.aptoslabs.com/v1");
//!
//! let resources = client.get_account_resources("0x1").await?;
//! println!("0x1 holds {} resources", resources.len());
//! # Ok(())
//! # }
//! ```

use crate::types::RawResource;
use async_trait::async_trait;
use lib_core::{AppError, Result};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-only access to account resources on a ledger node.
///
/// Implementations must be cheap to construct; network calls happen only when
/// a method is invoked.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Endpoint this client is bound to.
    fn endpoint(&self) -> &str;

    /// Fetch every resource held by `address`.
    async fn get_account_resources(&self, address: &str) -> Result<Vec<RawResource>>;

    /// Fetch one resource of `address` by its full type string.
    async fn get_account_resource(&self, address: &str, resource_type: &str) -> Result<RawResource>;
}

/// Error body returned by the fullnode on non-success statuses.
#[derive(Debug, Deserialize)]
struct AptosErrorBody {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

/// Aptos fullnode REST client.
///
/// Wraps a `reqwest::Client` (connection pooling, request timeout) bound to
/// one base URL such as `https://fullnode.mainnet.aptoslabs.com/v1`.
#[derive(Debug, Clone)]
pub struct AptosClient {
    http: Client,
    base_url: String,
}

impl AptosClient {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` with a custom request timeout.
    ///
    /// Building the HTTP client does not touch the network.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        debug!("🔗 Aptos RPC client bound to {}", base_url);

        Self { http, base_url }
    }

    /// `{base}/accounts/{address}/resources`
    pub fn resources_url(&self, address: &str) -> Result<Url> {
        self.account_url(address, &["resources"])
    }

    /// `{base}/accounts/{address}/resource/{type}`, with the type percent-encoded.
    pub fn resource_url(&self, address: &str, resource_type: &str) -> Result<Url> {
        self.account_url(address, &["resource", resource_type])
    }

    fn account_url(&self, address: &str, tail: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("Invalid RPC URL {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("RPC URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("accounts")
            .push(address)
            .extend(tail);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Rpc(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AppError::Decoding(format!("{} parse failed: {}", what, e)));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<AptosErrorBody>(&body) {
            Ok(err) => match err.error_code {
                Some(code) => format!("{} ({})", err.message, code),
                None => err.message,
            },
            Err(_) => body,
        };

        if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound(format!("{}: {}", what, detail)))
        } else {
            Err(AppError::Rpc(format!("{} returned {}: {}", what, status, detail)))
        }
    }
}

#[async_trait]
impl LedgerClient for AptosClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn get_account_resources(&self, address: &str) -> Result<Vec<RawResource>> {
        let url = self.resources_url(address)?;
        self.get_json(url, &format!("resources of {}", address)).await
    }

    async fn get_account_resource(&self, address: &str, resource_type: &str) -> Result<RawResource> {
        let url = self.resource_url(address, resource_type)?;
        self.get_json(url, &format!("{} of {}", resource_type, address)).await
    }
}
