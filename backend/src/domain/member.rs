//! Household members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Maximum length of member and item names.
pub const NAME_MAX: usize = 64;

/// Validation errors for free-text names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    Empty,
    /// The name exceeded [`NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Trim a free-text name and enforce its length bounds.
pub(crate) fn normalise_name(raw: &str) -> Result<String, NameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(NameError::TooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}

/// Display name of a household member.
///
/// # Examples
/// ```
/// use messbook::domain::MemberName;
///
/// let name = MemberName::new("  Alice ").expect("valid name");
/// assert_eq!(name.as_ref(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberName(String);

impl MemberName {
    /// Trim and validate a member name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NameError> {
        normalise_name(raw.as_ref()).map(Self)
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MemberName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberName> for String {
    fn from(value: MemberName) -> Self {
        value.0
    }
}

/// Role a member holds inside the household.
///
/// Independent from the login role of any user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Helps run the household books.
    Manager,
    /// Regular member.
    #[default]
    Member,
}

impl MemberRole {
    /// Lowercase storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{value}'")]
pub struct UnknownRoleError {
    /// The rejected label.
    pub value: String,
}

impl FromStr for MemberRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            other => Err(UnknownRoleError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A person who shares meals and rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier.
    pub id: MemberId,
    /// Display name.
    pub name: MemberName,
    /// Household role.
    #[serde(default)]
    pub role: MemberRole,
    /// Username of the account that added the member.
    #[serde(default)]
    pub created_by: String,
}
