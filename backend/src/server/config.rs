//! Server settings loaded via OrthoConfig.
//!
//! Every value can be given as a `--flag`, a `TIMESHEET_*` environment
//! variable, or in a configuration file.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_TOKEN_TTL;
use crate::outbound::memory::SimulatedLatency;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid server settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The token lifetime is zero or too large.
    #[error("token TTL must be between 1 second and 1 year, got {seconds}s")]
    TokenTtl { seconds: u64 },
}

/// Configuration for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TIMESHEET")]
pub struct ServerSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Access token lifetime in seconds. Defaults to one hour.
    pub token_ttl_secs: Option<u64>,
    /// Artificial delay added to each in-memory store call.
    pub latency_ms: Option<u64>,
    /// Seed the demo users, weeks and entries on startup. Defaults to `true`.
    pub seed_demo_data: Option<bool>,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Access token lifetime.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let Some(seconds) = self.token_ttl_secs else {
            return Ok(DEFAULT_TOKEN_TTL);
        };
        const ONE_YEAR: u64 = 365 * 24 * 60 * 60;
        if !(1..=ONE_YEAR).contains(&seconds) {
            return Err(SettingsError::TokenTtl { seconds });
        }
        i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(SettingsError::TokenTtl { seconds })
    }

    /// Delay applied by the in-memory adapters.
    #[must_use]
    pub fn latency(&self) -> SimulatedLatency {
        self.latency_ms
            .map_or(SimulatedLatency::NONE, SimulatedLatency::from_millis)
    }

    /// Whether the demo dataset is seeded at startup.
    #[must_use]
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }

    /// Database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: None,
            database_url: None,
            token_ttl_secs: None,
            latency_ms: None,
            seed_demo_data: None,
        }
    }
}
