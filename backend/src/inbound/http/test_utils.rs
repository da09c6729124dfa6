//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{MockHouseholdCommand, MockHouseholdQuery, MockLoginService};
use crate::domain::{User, UserId, UserRole, Username};

use super::configure;
use super::error::{json_config, path_config, query_config};
use super::state::HttpState;

/// Session middleware with a fresh key and an insecure cookie named
/// `session`, suitable for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Clock frozen at 2024-05-15 12:00 UTC.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Account fixture with a stable id derived from `role`.
pub fn user_with_role(role: UserRole) -> User {
    let (id, name) = match role {
        UserRole::Admin => ("00000000-0000-0000-0000-00000000000a", "admin-user"),
        UserRole::Manager => ("00000000-0000-0000-0000-00000000000b", "manager-user"),
        UserRole::Member => ("00000000-0000-0000-0000-00000000000c", "member-user"),
    };
    User::new(
        UserId::new(id).expect("fixture id"),
        Username::new(name).expect("fixture username"),
        role,
    )
}

/// Port doubles handed to [`state_from_mocks`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub command: MockHouseholdCommand,
    pub query: MockHouseholdQuery,
}

/// Build handler state from mock ports and the fixed clock.
pub fn state_from_mocks(ports: MockPorts) -> HttpState {
    HttpState::new(
        Arc::new(ports.login),
        Arc::new(ports.command),
        Arc::new(ports.query),
        Arc::new(FixedClock::default()),
    )
}

/// App serving every `/api/v1` route over `state` with a test session.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure),
        )
}

/// Sign in through `/api/v1/login` and yield the session cookie.
///
/// The login mock must accept any credentials.
macro_rules! login_cookie {
    ($app:expr) => {{
        let request = actix_web::test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "username": "fixture", "password": "password" }))
            .to_request();
        let response = actix_web::test::call_service($app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::OK,
            "fixture login failed"
        );
        $crate::inbound::http::test_utils::session_cookie(&response).expect("session cookie")
    }};
}
pub(crate) use login_cookie;

/// Login and lookup expectations that sign every request in as `user`.
pub fn signed_in_as(user: &User) -> MockLoginService {
    let mut login = MockLoginService::new();
    let authenticated = user.clone();
    login
        .expect_authenticate()
        .returning(move |_| Ok(authenticated.clone()));
    let found = user.clone();
    login
        .expect_find_user()
        .returning(move |_| Ok(found.clone()));
    login
}
