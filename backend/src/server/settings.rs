//! Startup settings loaded via OrthoConfig.
//!
//! Values come from CLI flags and `MEDCHECK_*` environment variables and are
//! read once at startup.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use medcheck::outbound::oracle::{DEFAULT_ORACLE_MODEL, DEFAULT_ORACLE_URL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid oracle URL {value:?}: {source}")]
    OracleUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Application settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEDCHECK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; fixtures are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Base URL of the interaction oracle API.
    pub oracle_url: Option<String>,
    /// Model queried for interaction answers.
    pub oracle_model: Option<String>,
    /// API key for the oracle; the oracle is disabled when absent.
    pub oracle_api_key: Option<String>,
    /// Whole-request timeout for oracle calls, in seconds.
    pub oracle_timeout_secs: Option<u64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("oracle_url", &self.oracle_url)
            .field("oracle_model", &self.oracle_model)
            .field("oracle_api_key", &self.oracle_api_key.as_ref().map(|_| "<redacted>"))
            .field("oracle_timeout_secs", &self.oracle_timeout_secs)
            .finish()
    }
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn oracle_url(&self) -> Result<url::Url, SettingsError> {
        let value = self.oracle_url.as_deref().unwrap_or(DEFAULT_ORACLE_URL);
        url::Url::parse(value).map_err(|source| SettingsError::OracleUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn oracle_model(&self) -> &str {
        self.oracle_model.as_deref().unwrap_or(DEFAULT_ORACLE_MODEL)
    }

    /// The API key, if one is configured and non-blank.
    pub fn oracle_api_key(&self) -> Option<Zeroizing<String>> {
        self.oracle_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    pub fn oracle_timeout(&self) -> Option<Duration> {
        self.oracle_timeout_secs.map(Duration::from_secs)
    }
}
