//! Extractors resolving the caller from a bearer token or the session cookie.
//!
//! `Authorization: Bearer <token>` wins over the cookie when both are sent.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Token presented with the request, if any.
pub struct PresentedToken(pub Option<AccessToken>);

/// The user owning a live access token.
///
/// Rejects the request with `401 Unauthorized` when no token is presented or
/// the token is unknown or expired.
pub struct AuthenticatedUser {
    /// Resolved user.
    pub user: User,
    /// Token that authenticated the request.
    pub token: AccessToken,
}

fn bearer_token(req: &HttpRequest) -> Result<Option<AccessToken>, Error> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    match raw.strip_prefix(BEARER_PREFIX) {
        Some(token) => Ok(AccessToken::from_presented(token.trim())),
        None => Err(Error::unauthorized("authorization scheme must be Bearer")),
    }
}

impl FromRequest for PresentedToken {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bearer = bearer_token(req);
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            if let Some(token) = bearer? {
                return Ok(Self(Some(token)));
            }
            let session = session.await?;
            Ok(Self(session.token()?))
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let presented = PresentedToken::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured for this app"))?;
            let token = presented
                .await?
                .0
                .ok_or_else(|| Error::unauthorized("login required"))?;
            let user = state
                .login
                .resolve_token(&token)
                .await?
                .ok_or_else(|| Error::unauthorized("session expired or revoked"))?;
            Ok(Self { user, token })
        })
    }
}
