//! Server configuration loaded via OrthoConfig.
//!
//! Values layer defaults, an optional configuration file, `MESSBOOK_*`
//! environment variables and command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session_config::SessionToggles;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Where the ledger lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through Diesel.
    Postgres { database_url: String },
    /// A single JSON document on disk.
    JsonFile { path: PathBuf },
    /// Process memory; lost on restart.
    Memory,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind_addr '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("bcrypt_cost {value} outside {min}..={max}")]
    BcryptCost { value: u32, min: u32, max: u32 },
}

/// Application settings for the `messbook` server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MESSBOOK")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; selects the Diesel adapter.
    pub database_url: Option<String>,
    /// JSON ledger document; used when no database URL is set.
    pub ledger_path: Option<PathBuf>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    pub session_cookie_secure: Option<bool>,
    /// `Strict`, `Lax` or `None`.
    pub session_same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    pub session_allow_ephemeral: Option<bool>,
    /// Work factor for password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Storage adapter selected by the configured locations.
    pub fn storage(&self) -> StorageBackend {
        let database_url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        match (database_url, &self.ledger_path) {
            (Some(url), _) => StorageBackend::Postgres {
                database_url: url.to_owned(),
            },
            (None, Some(path)) => StorageBackend::JsonFile { path: path.clone() },
            (None, None) => StorageBackend::Memory,
        }
    }

    /// Validated bcrypt cost, defaulting to [`bcrypt::DEFAULT_COST`].
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        const MIN: u32 = 4;
        const MAX: u32 = 31;
        match self.bcrypt_cost {
            None => Ok(bcrypt::DEFAULT_COST),
            Some(value) if (MIN..=MAX).contains(&value) => Ok(value),
            Some(value) => Err(SettingsError::BcryptCost {
                value,
                min: MIN,
                max: MAX,
            }),
        }
    }

    /// Session toggles for [`crate::inbound::http::session_config::session_settings`].
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.session_cookie_secure,
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}
