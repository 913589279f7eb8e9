//! Connection management for the TracOS store.

use async_trait::async_trait;

use crate::retry::{retry, RetryPolicy};

/// Something that can open a handle to the store.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Send + Sync;

    /// Human-readable target for log lines.
    fn describe(&self) -> String;

    /// Make one connection attempt.
    async fn connect(&self) -> anyhow::Result<Self::Handle>;

    /// Release a handle obtained from [`Connector::connect`].
    async fn disconnect(&self, handle: Self::Handle) {
        drop(handle);
    }
}

/// Owns the single store handle shared by every stage of a pipeline run.
///
/// Connecting never fails loudly: once the retry policy is exhausted the
/// manager stays disconnected and [`ConnectionManager::handle`] returns
/// `None`, which callers treat as "store unavailable".
pub struct ConnectionManager<C: Connector> {
    connector: C,
    policy: RetryPolicy,
    handle: Option<C::Handle>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self {
            connector,
            policy,
            handle: None,
        }
    }

    /// Connect if not already connected and return the shared handle.
    ///
    /// An existing handle is returned as-is without contacting the store.
    pub async fn connect(&mut self) -> Option<&C::Handle> {
        if self.handle.is_some() {
            return self.handle.as_ref();
        }

        let target = self.connector.describe();
        tracing::info!(
            "Connecting to {} (up to {} attempts)",
            target,
            self.policy.max_attempts
        );

        let connector = &self.connector;
        let what = format!("Connecting to {target}");
        match retry(&self.policy, &what, |_| connector.connect()).await {
            Ok(handle) => {
                tracing::info!("Connected to {target}");
                self.handle = Some(handle);
            }
            Err(e) => {
                tracing::error!("Store unavailable, continuing disconnected: {e:#}");
            }
        }

        self.handle.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// The shared handle, if connected.
    pub fn handle(&self) -> Option<&C::Handle> {
        self.handle.as_ref()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Release the handle and return to the uninitialized state.
    pub async fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.connector.disconnect(handle).await;
            tracing::info!("Closed connection to {}", self.connector.describe());
        }
    }
}
