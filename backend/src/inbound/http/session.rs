//! Cookie session wrapper holding the caller's access token.
//!
//! Handlers deal in [`AccessToken`] values; the Actix session API stays here.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, Error};

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

/// Session operations used by the authentication handlers.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` in the encrypted session cookie.
    pub fn persist_token(&self, token: &AccessToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCESS_TOKEN_KEY, token.expose())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token stored in the cookie, if any.
    pub fn token(&self) -> Result<Option<AccessToken>, Error> {
        let raw = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.as_deref().and_then(AccessToken::from_presented))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
