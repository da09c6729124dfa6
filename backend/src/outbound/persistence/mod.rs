//! PostgreSQL adapters built on Diesel.
//!
//! Repositories here only translate between row structs and domain records.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//! this module. Connections come from a shared `bb8` pool through
//! `diesel-async`; migrations use a short-lived synchronous connection.
//!
//! ```ignore
//! use messbook::outbound::persistence::{DbPool, DieselHouseholdRepository, PoolConfig};
//!
//! run_migrations("postgres://localhost/messbook")?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/messbook")).await?;
//! let ledger = DieselHouseholdRepository::new(pool.clone());
//! ```

mod diesel_error_mapping;
mod diesel_household_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_household_repository::DieselHouseholdRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
