//! Backend entry-point: loads settings, opens the ledger store and serves the
//! household API, health probes and (in debug builds) OpenAPI docs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(feature = "example-data")]
use messbook::example_data::ExampleDataSettings;
use messbook::inbound::http::health::HealthState;
use messbook::inbound::http::session_config::{BuildMode, session_settings};
use messbook::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = load_server_config()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

fn load_server_config() -> io::Result<ServerConfig> {
    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let bcrypt_cost = settings.bcrypt_cost().map_err(io::Error::other)?;

    let config = ServerConfig::from_session(session, bind_addr)
        .with_storage(settings.storage())
        .with_bcrypt_cost(bcrypt_cost);

    #[cfg(feature = "example-data")]
    let config = config.with_example_data(
        ExampleDataSettings::load().map_err(|err| io::Error::other(err.to_string()))?,
    );

    Ok(config)
}
