//! Driving port for login, token resolution and logout.
//!
//! Inbound adapters call it to authenticate without knowing the backing
//! stores, which keeps handler tests deterministic.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthenticatedSession, Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a token. Unknown emails and wrong
    /// passwords fail with the same `unauthorized` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedSession, Error>;

    /// User owning a live token; `None` for unknown or expired tokens.
    async fn resolve_token(&self, token: &AccessToken) -> Result<Option<User>, Error>;

    /// Revoke a token. Unknown tokens are ignored.
    async fn logout(&self, token: &AccessToken) -> Result<(), Error>;
}
