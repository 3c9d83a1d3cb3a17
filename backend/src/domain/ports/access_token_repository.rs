//! Driven port storing issued access tokens by fingerprint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{TokenFingerprint, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by access token stores.
    pub enum AccessTokenRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "access token store connection failed: {message}",
        /// A read or write failed.
        Query { message: String } => "access token store query failed: {message}",
    }
}

/// An issued token. The raw token is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenRecord {
    /// SHA-256 fingerprint of the token.
    pub fingerprint: TokenFingerprint,
    /// Owner of the token.
    pub user_id: UserId,
    /// Instant after which the token must not resolve.
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Remember a newly issued token.
    async fn store(&self, record: &AccessTokenRecord) -> Result<(), AccessTokenRepositoryError>;

    /// Look a token up by fingerprint, expired or not.
    async fn find(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<AccessTokenRecord>, AccessTokenRepositoryError>;

    /// Forget a token. Returns `false` when it was not stored.
    async fn revoke(&self, fingerprint: &TokenFingerprint)
    -> Result<bool, AccessTokenRepositoryError>;

    /// Drop every token whose expiry is at or before `now`, returning how
    /// many were removed.
    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, AccessTokenRepositoryError>;
}
