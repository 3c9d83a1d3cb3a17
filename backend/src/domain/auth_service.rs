//! Authentication service implementing [`LoginService`].

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AccessTokenRecord, AccessTokenRepository, AccessTokenRepositoryError, LoginService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, AuthenticatedSession, Error, LoginCredentials, PasswordDigest, User,
};

/// Lifetime of an issued access token unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::hours(1);

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Digest checked when the email is unknown.
static DECOY_DIGEST: LazyLock<Option<PasswordDigest>> =
    LazyLock::new(|| PasswordDigest::hash("decoy-password").ok());

/// Issues, resolves and revokes access tokens for seeded users.
pub struct AuthService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    token_ttl: TimeDelta,
}

impl<U, T> AuthService<U, T> {
    /// Create a service issuing tokens valid for [`DEFAULT_TOKEN_TTL`].
    pub fn new(users: Arc<U>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            tokens,
            clock,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    pub fn with_token_ttl(mut self, token_ttl: TimeDelta) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user store unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user store error: {message}"))
            }
        }
    }

    fn map_token_error(error: AccessTokenRepositoryError) -> Error {
        match error {
            AccessTokenRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("token store unavailable: {message}"))
            }
            AccessTokenRepositoryError::Query { message } => {
                Error::internal(format!("token store error: {message}"))
            }
        }
    }

    async fn verified_user(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?;
        Ok(match stored {
            Some(found) if found.password.verify(credentials.password()) => Some(found.user),
            Some(_) => None,
            None => {
                // Same hashing cost as a wrong password.
                if let Some(decoy) = DECOY_DIGEST.as_ref() {
                    decoy.verify(credentials.password());
                }
                None
            }
        })
    }
}

#[async_trait]
impl<U, T> LoginService for AuthService<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedSession, Error> {
        let Some(user) = self.verified_user(credentials).await? else {
            info!(outcome = "rejected", "login attempt");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let now = self.clock.utc();
        let pruned = self
            .tokens
            .prune_expired(now)
            .await
            .map_err(Self::map_token_error)?;
        if pruned > 0 {
            debug!(pruned, "expired access tokens removed");
        }

        let token = AccessToken::generate();
        let expires_at = now + self.token_ttl;
        let record = AccessTokenRecord {
            fingerprint: token.fingerprint(),
            user_id: *user.id(),
            expires_at,
        };
        self.tokens
            .store(&record)
            .await
            .map_err(Self::map_token_error)?;

        info!(outcome = "accepted", user_id = %user.id(), %expires_at, "login attempt");
        Ok(AuthenticatedSession {
            user,
            token,
            expires_at,
        })
    }

    async fn resolve_token(&self, token: &AccessToken) -> Result<Option<User>, Error> {
        let Some(record) = self
            .tokens
            .find(&token.fingerprint())
            .await
            .map_err(Self::map_token_error)?
        else {
            return Ok(None);
        };
        if record.expires_at <= self.clock.utc() {
            debug!(user_id = %record.user_id, "access token expired");
            self.tokens
                .revoke(&record.fingerprint)
                .await
                .map_err(Self::map_token_error)?;
            return Ok(None);
        }
        self.users
            .find_by_id(&record.user_id)
            .await
            .map_err(Self::map_user_error)
    }

    async fn logout(&self, token: &AccessToken) -> Result<(), Error> {
        let revoked = self
            .tokens
            .revoke(&token.fingerprint())
            .await
            .map_err(Self::map_token_error)?;
        info!(revoked, "logout");
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
