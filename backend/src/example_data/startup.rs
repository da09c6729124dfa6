//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{RegistryError, SeedRegistry};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::HouseholdRepository;
use crate::domain::{
    BillingMonth, ExampleDataSeedOutcome, ExampleDataSeedingError, HouseholdSeeder, SeedingResult,
};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Generation or persistence failed.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Seed an empty ledger with a demo household dated in `month`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use messbook::domain::BillingMonth;
/// use messbook::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use messbook::outbound::memory::InMemoryLedgerStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings::default();
/// let month = BillingMonth::parse("2024-05")?;
/// let store = Arc::new(InMemoryLedgerStore::default());
/// let outcome = seed_example_data_on_startup(&settings, store, &month).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup<R>(
    settings: &ExampleDataSettings,
    repository: Arc<R>,
    month: &BillingMonth,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError>
where
    R: HouseholdRepository + ?Sized,
{
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let outcome = HouseholdSeeder::new(repository)
        .seed_from_registry(&registry, seed_name, settings.member_count, month)
        .await?;

    match outcome.result {
        SeedingResult::Applied => info!(
            seed_key = %outcome.seed_key,
            member_count = outcome.member_count,
            month = %outcome.month,
            "example household seeded"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_key = %outcome.seed_key,
            "ledger already has members; example data skipped"
        ),
    }

    Ok(Some(outcome))
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
