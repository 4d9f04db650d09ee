//! # Resource Accessor
//!
//! Single and full resource reads for an account, through whatever client
//! handle the [`ConnectionManager`] holds at call time.

use crate::connection::ConnectionManager;
use crate::types::{Lookup, RawResource};
use lib_core::{AppError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct ResourceAccessor {
    connection: Arc<ConnectionManager>,
}

impl ResourceAccessor {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    /// Payload of one resource, or `None` when the input is empty or the fetch
    /// fails for any reason (missing resource and network error alike).
    pub async fn get_account_resource(&self, account: &str, resource_type: &str) -> Option<Value> {
        self.lookup_account_resource(account, resource_type).await.found()
    }

    /// Payload of one resource, keeping "not on-chain" apart from "request failed".
    ///
    /// Empty input is rejected as [`Lookup::Failed`] without any I/O.
    pub async fn lookup_account_resource(&self, account: &str, resource_type: &str) -> Lookup<Value> {
        if account.is_empty() || resource_type.is_empty() {
            return Lookup::Failed(AppError::InvalidInput(
                "account and resource type are required".to_string(),
            ));
        }

        // Hold this handle for the whole request, even if it is renewed meanwhile.
        let client = self.connection.get_client();
        let lookup = Lookup::from_result(
            client
                .get_account_resource(account, resource_type)
                .await
                .map(|resource| resource.data),
        );

        if let Lookup::Failed(e) = &lookup {
            debug!("Resource {} of {} unavailable: {}", resource_type, account, e);
        }
        lookup
    }

    /// Every resource of `account`.
    pub async fn get_account_resources(&self, account: &str) -> Result<Vec<RawResource>> {
        if account.is_empty() {
            return Err(AppError::InvalidInput("account is required".to_string()));
        }
        let client = self.connection.get_client();
        client.get_account_resources(account).await
    }
}
