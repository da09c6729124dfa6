//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A grocery name would be rejected as a shopping item name.
    #[error("invalid grocery name at index {index}: '{value}'")]
    InvalidGroceryName {
        /// Index of the invalid name in the array.
        index: usize,
        /// The rejected name.
        value: String,
    },

    /// The registry lists no groceries to buy.
    #[error("registry contains no grocery names")]
    EmptyGroceries,

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during household generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Could not find a distinct valid member name after maximum retries.
    #[error("failed to generate a distinct member name after {max_attempts} attempts")]
    MemberNameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The registry lists no groceries to buy.
    #[error("registry contains no grocery names for purchases")]
    NoGroceries,
}
