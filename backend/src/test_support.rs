//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or when the
//! `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use serde_json::{Map, Value, json};

use crate::domain::ports::{StoreHealth, StoreStatus, UserStore, UserStoreError};
use crate::domain::{NewUser, RegistrationPayload, User, UserId};

/// Clock whose reading only changes when advanced explicitly.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `seconds`.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    failure: Option<UserStoreError>,
    hide_lookups: bool,
}

/// In-memory [`UserStore`] enforcing the same email uniqueness as the
/// database adapter.
///
/// Every call takes a single lock, so uniqueness holds under concurrent
/// inserts. [`InMemoryUserStore::hide_lookups`] makes `find_by_email` report
/// no match, reproducing two registrations that both pass the advisory
/// lookup before either inserts.
pub struct InMemoryUserStore {
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
}

impl InMemoryUserStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Make every subsequent call fail with `failure`.
    pub fn fail_with(&self, failure: UserStoreError) {
        self.lock_state().failure = Some(failure);
    }

    /// Make `find_by_email` report no match regardless of stored users.
    pub fn hide_lookups(&self) {
        self.lock_state().hide_lookups = true;
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock_state().users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn checked_state(&self) -> Result<MutexGuard<'_, StoreState>, UserStoreError> {
        let state = self.lock_state();
        match &state.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        let mut state = self.checked_state()?;
        if state.users.iter().any(|stored| stored.email() == user.email()) {
            return Err(UserStoreError::duplicate_email(user.email()));
        }
        let stored = User::from_new(UserId::random(), user.clone(), self.clock.utc());
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let state = self.checked_state()?;
        if state.hide_lookups {
            return Ok(None);
        }
        Ok(state
            .users
            .iter()
            .find(|stored| stored.email() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserStoreError> {
        let state = self.checked_state()?;
        let mut users: Vec<User> = state.users.iter().rev().cloned().collect();
        // Stable sort keeps later inserts first among equal timestamps.
        users.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(users)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserStoreError> {
        let mut state = self.checked_state()?;
        let before = state.users.len();
        state.users.retain(|stored| stored.id() != id);
        Ok(state.users.len() != before)
    }
}

#[async_trait]
impl StoreHealth for InMemoryUserStore {
    async fn status(&self) -> StoreStatus {
        if self.lock_state().failure.is_some() {
            StoreStatus::Disconnected
        } else {
            StoreStatus::Connected
        }
    }
}

/// A payload that passes every field rule.
pub fn valid_registration_fields() -> Map<String, Value> {
    registration_fields(
        "Jo Ann",
        "JO@Example.com",
        "123-456-7890",
        "1 Main Street, Springfield",
    )
}

/// Build a registration body from its four fields.
pub fn registration_fields(
    name: &str,
    email: &str,
    contact_no: &str,
    address: &str,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".to_owned(), json!(name));
    fields.insert("email".to_owned(), json!(email));
    fields.insert("contactNo".to_owned(), json!(contact_no));
    fields.insert("address".to_owned(), json!(address));
    fields
}

/// [`registration_fields`] wrapped as a domain payload.
pub fn registration_payload(
    name: &str,
    email: &str,
    contact_no: &str,
    address: &str,
) -> RegistrationPayload {
    RegistrationPayload::new(registration_fields(name, email, contact_no, address))
}
