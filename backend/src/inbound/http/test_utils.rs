//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::User;
use crate::domain::ports::{MockLoginService, MockTimesheetCommand, MockTimesheetQuery};
use crate::inbound::http::state::HttpState;

pub(crate) const FIXTURE_USER_ID: &str = "00000000-0000-4000-8000-000000000002";

/// Cookie session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The demo "Test User".
pub fn fixture_user() -> User {
    User::try_from_strings(FIXTURE_USER_ID, "Test User", "test@gmail.com", None)
        .expect("valid fixture user")
}

/// State whose query and command ports must not be called.
pub fn state_with_login(login: MockLoginService) -> web::Data<HttpState> {
    state(login, MockTimesheetQuery::new(), MockTimesheetCommand::new())
}

/// State over the given mocks.
pub fn state(
    login: MockLoginService,
    timesheets: MockTimesheetQuery,
    entries: MockTimesheetCommand,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(login),
        Arc::new(timesheets),
        Arc::new(entries),
    ))
}

/// Login mock accepting `Bearer live-token` as the fixture user.
pub fn authenticated_login() -> MockLoginService {
    let mut login = MockLoginService::new();
    login
        .expect_resolve_token()
        .returning(|token| Ok((token.expose() == LIVE_TOKEN).then(fixture_user)));
    login
}

/// Token accepted by [`authenticated_login`].
pub const LIVE_TOKEN: &str = "live-token";
