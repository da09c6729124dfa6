//! Builders wiring the configured ledger store into HTTP state.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
#[cfg(feature = "example-data")]
use mockable::Clock;
use tracing::info;

use messbook::TraceId;
#[cfg(feature = "example-data")]
use messbook::domain::BillingMonth;
use messbook::domain::ports::{HouseholdRepository, UserRepository, UuidRecordIdGenerator};
use messbook::domain::{AccountService, HouseholdService};
#[cfg(feature = "example-data")]
use messbook::example_data::seed_example_data_on_startup;
use messbook::inbound::http::state::HttpState;
use messbook::outbound::json_store::JsonLedgerStore;
use messbook::outbound::memory::InMemoryLedgerStore;
use messbook::outbound::persistence::{
    DbPool, DieselHouseholdRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use messbook::settings::StorageBackend;

use super::ServerConfig;

/// Wrap a ledger repository and a user repository in the application services.
fn services<L, U>(ledger: Arc<L>, users: Arc<U>, bcrypt_cost: u32) -> HttpState
where
    L: HouseholdRepository + 'static,
    U: UserRepository + 'static,
{
    let household = Arc::new(HouseholdService::new(
        ledger,
        Arc::new(UuidRecordIdGenerator),
    ));
    HttpState::new(
        Arc::new(AccountService::new(users, bcrypt_cost)),
        household.clone(),
        household,
        Arc::new(DefaultClock),
    )
}

/// Seed (when enabled) and wrap the stores.
async fn assemble<L, U>(ledger: Arc<L>, users: Arc<U>, config: &ServerConfig) -> io::Result<HttpState>
where
    L: HouseholdRepository + 'static,
    U: UserRepository + 'static,
{
    #[cfg(feature = "example-data")]
    {
        let month = BillingMonth::from_naive(DefaultClock.utc().date_naive());
        seed_example_data_on_startup(&config.example_data, ledger.clone(), &month)
            .await
            .map_err(io::Error::other)?;
    }
    Ok(services(ledger, users, config.bcrypt_cost))
}

async fn postgres_state(database_url: &str, config: &ServerConfig) -> io::Result<HttpState> {
    let url = database_url.to_owned();
    let applied = TraceId::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| io::Error::other(format!("database pool: {}", err.message())))?;
    assemble(
        Arc::new(DieselHouseholdRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool)),
        config,
    )
    .await
}

/// Open the store named by `config` and build the handler state around it.
///
/// # Errors
///
/// Returns [`io::Error`] when the store cannot be opened or migrated.
pub(crate) async fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    match &config.storage {
        StorageBackend::Postgres { database_url } => {
            info!(backend = "postgres", "opening ledger store");
            postgres_state(database_url, config).await
        }
        StorageBackend::JsonFile { path } => {
            info!(backend = "json", path = %path.display(), "opening ledger store");
            let utf8 = camino::Utf8PathBuf::from_path_buf(path.clone()).map_err(|path| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("ledger path {} is not valid UTF-8", path.display()),
                )
            })?;
            let store = Arc::new(JsonLedgerStore::open(utf8).map_err(io::Error::other)?);
            assemble(store.clone(), store, config).await
        }
        StorageBackend::Memory => {
            info!(backend = "memory", "opening ledger store; data is lost on restart");
            let store = Arc::new(InMemoryLedgerStore::default());
            assemble(store.clone(), store, config).await
        }
    }
}
