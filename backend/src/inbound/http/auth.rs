//! Resolution of the signed-in user for handlers.

use tracing::warn;

use crate::domain::{Error, ErrorCode, User};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// The account behind the session cookie.
///
/// A session naming a deleted account is cleared and reported as
/// `401 Unauthorized`.
pub async fn current_user(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    let user_id = session.require_user_id()?;
    match state.login.find_user(&user_id).await {
        Ok(user) => Ok(user),
        Err(error) if error.code() == ErrorCode::NotFound => {
            warn!(%user_id, "session refers to a missing account");
            session.clear();
            Err(Error::unauthorized("login required"))
        }
        Err(error) => Err(error),
    }
}
