//! Lifecycle of the shared provider handle.
//!
//! One handle for the whole process, established lazily on first use. The
//! disconnected-to-connected transition is serialized behind a single-flight
//! guard so concurrent first-requests produce at most one physical connect
//! attempt; everyone else awaits its outcome.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::provider::client::{Connector, ProviderClient};

pub struct ProviderConnection {
    connector: Arc<dyn Connector>,
    handle: RwLock<Option<Arc<dyn ProviderClient>>>,
    connect_guard: Mutex<()>,
}

impl ProviderConnection {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            handle: RwLock::new(None),
            connect_guard: Mutex::new(()),
        }
    }

    /// Whether a provider handle is currently established
    pub fn is_connected(&self) -> bool {
        self.handle.read().is_some()
    }

    /// Attempt to establish the provider handle.
    ///
    /// Reports the outcome instead of raising: a failed attempt logs, leaves
    /// the connection in its disconnected state so a later call may retry,
    /// and returns `false`.
    pub async fn connect(&self) -> bool {
        match self.connector.connect().await {
            Ok(client) => {
                *self.handle.write() = Some(client);
                info!("Provider client connected successfully");
                true
            }
            Err(e) => {
                *self.handle.write() = None;
                error!(error = %e, "Failed to connect to provider");
                false
            }
        }
    }

    /// Return the established handle, connecting first if needed.
    ///
    /// Unlike `connect`, this enforces a precondition: if no handle can be
    /// established the enclosing operation is aborted with a connection
    /// error.
    pub async fn ensure_connected(&self) -> Result<Arc<dyn ProviderClient>> {
        if let Some(client) = self.handle.read().clone() {
            return Ok(client);
        }

        let _guard = self.connect_guard.lock().await;

        // Another caller may have connected while we waited for the guard.
        if let Some(client) = self.handle.read().clone() {
            return Ok(client);
        }

        self.connect().await;

        self.handle.read().clone().ok_or_else(|| {
            AppError::Connection("Provider connection could not be established".to_string())
        })
    }
}
