//! Driven port reporting the health of the backing store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Connection state reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StoreStatus {
    /// The store answered a round trip.
    Connected,
    /// The store could not be reached.
    Disconnected,
}

/// Probe for the backing store's reachability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Check whether the store currently answers requests.
    async fn status(&self) -> StoreStatus;
}

/// Fixture probe that always reports [`StoreStatus::Connected`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealth;

#[async_trait]
impl StoreHealth for FixtureStoreHealth {
    async fn status(&self) -> StoreStatus {
        StoreStatus::Connected
    }
}
