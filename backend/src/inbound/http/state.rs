//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! domain ports, so they stay testable without a database.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::Error;
use crate::domain::ports::{StoreHealth, UsersCommand, UsersQuery};

/// How much failure detail reaches clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorExposure {
    /// Internal failure details are returned in the `error` member.
    Detailed,
    /// Internal failure details are replaced with a generic string.
    #[default]
    Redacted,
}

impl ErrorExposure {
    /// Prepare `error` for a client response.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use backend::inbound::http::state::ErrorExposure;
    ///
    /// let err = Error::internal("Error fetching users").with_detail("pool timed out");
    /// let shown = ErrorExposure::Redacted.apply(err);
    /// assert_eq!(shown.detail(), Some("Internal server error"));
    /// ```
    pub fn apply(self, error: Error) -> Error {
        match self {
            Self::Detailed => error,
            Self::Redacted => error.redacted(),
        }
    }
}

/// Port implementations used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub store_health: Arc<dyn StoreHealth>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub store_health: Arc<dyn StoreHealth>,
    pub clock: Arc<dyn Clock>,
    pub error_exposure: ErrorExposure,
}

impl HttpState {
    /// Build state over `ports` using the system clock and redacted errors.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::UserRegistrationService;
    /// use backend::domain::ports::FixtureStoreHealth;
    /// use backend::inbound::http::state::{ErrorExposure, HttpState, HttpStatePorts};
    ///
    /// fn build(service: Arc<UserRegistrationService>) -> HttpState {
    ///     HttpState::new(HttpStatePorts {
    ///         users: service.clone(),
    ///         users_query: service,
    ///         store_health: Arc::new(FixtureStoreHealth),
    ///     })
    ///     .with_error_exposure(ErrorExposure::Detailed)
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            store_health,
        } = ports;
        Self {
            users,
            users_query,
            store_health,
            clock: Arc::new(DefaultClock),
            error_exposure: ErrorExposure::default(),
        }
    }

    /// Replace the clock used for response timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Choose how much failure detail reaches clients.
    pub fn with_error_exposure(mut self, exposure: ErrorExposure) -> Self {
        self.error_exposure = exposure;
        self
    }

    /// Apply the configured [`ErrorExposure`] to `error`.
    pub fn expose(&self, error: Error) -> Error {
        self.error_exposure.apply(error)
    }
}
