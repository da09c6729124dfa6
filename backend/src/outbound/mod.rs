//! Outbound adapters implementing the domain's storage ports.
//!
//! - **memory**: process-local store for development and tests
//! - **json_store**: single JSON document on disk, one file per household
//! - **persistence**: PostgreSQL repositories using Diesel
//!
//! Adapters translate between domain records and their storage shape and
//! hold no business rules.

mod ledger_document;

pub mod json_store;
pub mod memory;
pub mod persistence;
