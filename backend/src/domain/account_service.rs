//! Account sign-up and login backed by a [`UserRepository`].
//!
//! Passwords are hashed and verified with bcrypt on the blocking pool so
//! request handlers never stall the async runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserAccount, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, Registration, TraceId, User, UserId, Username};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already taken"))
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Account service implementing [`LoginService`].
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    bcrypt_cost: u32,
}

impl<R> AccountService<R> {
    /// Create a service hashing new passwords with `bcrypt_cost` rounds.
    pub fn new(users: Arc<R>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }
}

async fn hash_password(password: &str, cost: u32) -> Result<String, Error> {
    let password = Zeroizing::new(password.to_owned());
    TraceId::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

async fn verify_password(password: &str, hash: String) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    TraceId::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password verification failed: {err}")))
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(registration.username())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(format!(
                "username {} is already taken",
                registration.username()
            )));
        }

        let password_hash = hash_password(registration.password(), self.bcrypt_cost).await?;
        let account = UserAccount {
            user: User::new(
                UserId::random(),
                registration.username().clone(),
                registration.role(),
            ),
            password_hash,
        };
        self.users.insert(&account).await.map_err(map_user_error)?;
        info!(
            user_id = %account.user.id(),
            role = %account.user.role(),
            "account registered"
        );
        Ok(account.user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(invalid_credentials());
        };
        let Some(account) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
        else {
            debug!("login for unknown username");
            return Err(invalid_credentials());
        };

        if verify_password(credentials.password(), account.password_hash).await? {
            Ok(account.user)
        } else {
            debug!(user_id = %account.user.id(), "login with wrong password");
            Err(invalid_credentials())
        }
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|account| account.user)
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
