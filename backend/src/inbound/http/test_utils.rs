//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::UserRegistrationService;
use crate::test_support::{InMemoryUserStore, MutableClock};

use super::state::{HttpState, HttpStatePorts};

/// Instant every test clock starts from.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at [`fixed_now`].
pub fn test_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixed_now()))
}

/// Empty in-memory store on a frozen clock.
pub fn test_store() -> Arc<InMemoryUserStore> {
    Arc::new(InMemoryUserStore::new(test_clock()))
}

/// HTTP state whose ports all run over `store`.
pub fn state_over(store: Arc<InMemoryUserStore>) -> HttpState {
    let service = Arc::new(UserRegistrationService::new(store.clone()));
    HttpState::new(HttpStatePorts {
        users: service.clone(),
        users_query: service,
        store_health: store,
    })
    .with_clock(test_clock())
}
