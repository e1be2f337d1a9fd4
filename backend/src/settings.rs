//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `--kebab-case` CLI flags or `REGISTRY_*` environment
//! variables. Only the database URL is mandatory.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::cors::OriginPolicy;
use crate::inbound::http::state::ErrorExposure;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ENVIRONMENT: &str = "production";
const DEVELOPMENT: &str = "development";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5175,http://localhost:5173,http://localhost:3000";
const DEFAULT_TRUSTED_ORIGIN_SUFFIXES: &str = ".netlify.app";

/// Configuration problems detected before the server starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("REGISTRY_DATABASE_URL is not defined")]
    MissingDatabaseUrl,
    /// The host is not an IP address.
    #[error("invalid bind host {host:?}: {message}")]
    InvalidHost { host: String, message: String },
}

/// Settings for the registration service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// `development` returns failure details to clients.
    pub environment: Option<String>,
    /// Comma-separated origins allowed for cross-origin requests.
    pub allowed_origins: Option<String>,
    /// Comma-separated origin suffixes allowed for cross-origin requests.
    pub trusted_origin_suffixes: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

fn comma_separated(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_owned).collect()
}

impl AppSettings {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Socket address to bind, from host and port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST).trim();
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Deployment environment name, `production` when unset.
    pub fn environment(&self) -> &str {
        self.environment
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// How much failure detail reaches clients.
    pub fn error_exposure(&self) -> ErrorExposure {
        if self.environment().eq_ignore_ascii_case(DEVELOPMENT) {
            ErrorExposure::Detailed
        } else {
            ErrorExposure::Redacted
        }
    }

    /// Cross-origin policy from the configured lists.
    pub fn origin_policy(&self) -> OriginPolicy {
        let allowed = self
            .allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS);
        let suffixes = self
            .trusted_origin_suffixes
            .as_deref()
            .unwrap_or(DEFAULT_TRUSTED_ORIGIN_SUFFIXES);
        OriginPolicy::new(comma_separated(allowed), comma_separated(suffixes))
    }

    /// Pool settings for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let config = PoolConfig::new(self.database_url()?);
        Ok(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "REGISTRY_DATABASE_URL",
        "REGISTRY_HOST",
        "REGISTRY_PORT",
        "REGISTRY_ENVIRONMENT",
        "REGISTRY_ALLOWED_ORIGINS",
        "REGISTRY_TRUSTED_ORIGIN_SUFFIXES",
        "REGISTRY_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("registration-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 5000)))
        );
        assert_eq!(settings.environment(), "production");
        assert_eq!(settings.error_exposure(), ErrorExposure::Redacted);
        let policy = settings.origin_policy();
        assert!(policy.allows("http://localhost:5175"));
        assert!(policy.allows("https://site.netlify.app"));
        assert!(!policy.allows("https://example.com"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("REGISTRY_DATABASE_URL", "postgres://registry@db/registry"),
            ("REGISTRY_HOST", "127.0.0.1"),
            ("REGISTRY_PORT", "8081"),
            ("REGISTRY_ENVIRONMENT", "development"),
            (
                "REGISTRY_ALLOWED_ORIGINS",
                "https://app.example.com, https://admin.example.com",
            ),
            ("REGISTRY_TRUSTED_ORIGIN_SUFFIXES", ".internal.example"),
            ("REGISTRY_POOL_MAX_SIZE", "3"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(),
            Ok("postgres://registry@db/registry")
        );
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8081)))
        );
        assert_eq!(settings.error_exposure(), ErrorExposure::Detailed);
        let policy = settings.origin_policy();
        assert!(policy.allows("https://admin.example.com"));
        assert!(policy.allows("https://ops.internal.example"));
        assert!(!policy.allows("https://site.netlify.app"));
        assert_eq!(
            settings.pool_config().expect("pool config").max_size(),
            3
        );
    }

    #[rstest]
    fn invalid_host_is_reported() {
        let _guard = lock_env(env_with(&[("REGISTRY_HOST", "not a host")]));

        let settings = load_from_empty_args();

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
