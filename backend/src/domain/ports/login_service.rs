//! Driving port for sign-up and authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing account store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Create an account and return it.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the user behind a session.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
