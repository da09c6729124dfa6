//! Opaque record identifiers.
//!
//! Identifiers are compared for equality only. Stored households carry a mix
//! of formats (small integers, millisecond timestamps, UUIDs), so the only
//! requirements are that an identifier is non-empty and contains no
//! whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier contained whitespace.
    #[error("identifier must not contain whitespace")]
    ContainsWhitespace,
    /// The identifier exceeded the maximum length.
    #[error("identifier must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Maximum accepted identifier length.
pub const IDENTIFIER_MAX: usize = 64;

fn validate(value: String) -> Result<String, IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdentifierError::ContainsWhitespace);
    }
    if value.chars().count() > IDENTIFIER_MAX {
        return Err(IdentifierError::TooLong {
            max: IDENTIFIER_MAX,
        });
    }
    Ok(value)
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
                validate(value.into()).map(Self)
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_identifier! {
    /// Identifier of a household member.
    ///
    /// # Examples
    /// ```
    /// use messbook::domain::MemberId;
    ///
    /// assert_eq!(MemberId::new("1700000000000").expect("valid").as_str(), "1700000000000");
    /// assert!(MemberId::new("two words").is_err());
    /// ```
    MemberId
}

define_identifier! {
    /// Identifier of a meal entry, shopping item, rent cost or rent payment.
    RecordId
}
