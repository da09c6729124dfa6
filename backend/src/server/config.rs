//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "example-data")]
use messbook::example_data::ExampleDataSettings;
use messbook::inbound::http::session_config::SessionSettings;
use messbook::settings::StorageBackend;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageBackend,
    pub(crate) bcrypt_cost: u32,
    #[cfg(feature = "example-data")]
    pub(crate) example_data: ExampleDataSettings,
}

impl ServerConfig {
    /// Construct a configuration backed by process memory.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            storage: StorageBackend::Memory,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            #[cfg(feature = "example-data")]
            example_data: ExampleDataSettings::default(),
        }
    }

    /// Construct a configuration from validated session settings.
    #[must_use]
    pub fn from_session(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self::new(key, cookie_secure, same_site, bind_addr)
    }

    /// Select the ledger store.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Override the password hashing cost.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Seed an empty ledger with a demo household on startup.
    #[cfg(feature = "example-data")]
    #[must_use]
    pub fn with_example_data(mut self, settings: ExampleDataSettings) -> Self {
        self.example_data = settings;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Read by the bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
