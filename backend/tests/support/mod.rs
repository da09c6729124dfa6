//! Shared helpers for Messbook integration tests that need PostgreSQL.
//!
//! Integration tests compile as separate crates, so suites that need the
//! embedded cluster pull this module in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_database, shared_cluster};
