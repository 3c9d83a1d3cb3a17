//! In-memory access token store keyed by fingerprint.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{POISONED, SimulatedLatency};
use crate::domain::TokenFingerprint;
use crate::domain::ports::{AccessTokenRecord, AccessTokenRepository, AccessTokenRepositoryError};

/// Issued tokens held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryAccessTokenRepository {
    tokens: RwLock<HashMap<TokenFingerprint, AccessTokenRecord>>,
    latency: SimulatedLatency,
}

impl InMemoryAccessTokenRepository {
    /// Create an empty token store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn store(&self, record: &AccessTokenRecord) -> Result<(), AccessTokenRepositoryError> {
        self.latency.wait().await;
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AccessTokenRepositoryError::query(POISONED))?;
        tokens.insert(record.fingerprint.clone(), record.clone());
        Ok(())
    }

    async fn find(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<AccessTokenRecord>, AccessTokenRepositoryError> {
        self.latency.wait().await;
        let tokens = self
            .tokens
            .read()
            .map_err(|_| AccessTokenRepositoryError::query(POISONED))?;
        Ok(tokens.get(fingerprint).cloned())
    }

    async fn revoke(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<bool, AccessTokenRepositoryError> {
        self.latency.wait().await;
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AccessTokenRepositoryError::query(POISONED))?;
        Ok(tokens.remove(fingerprint).is_some())
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, AccessTokenRepositoryError> {
        self.latency.wait().await;
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AccessTokenRepositoryError::query(POISONED))?;
        let before = tokens.len();
        tokens.retain(|_, record| record.expires_at > now);
        Ok(before.saturating_sub(tokens.len()))
    }
}

impl InMemoryAccessTokenRepository {
    /// Number of records currently held, expired ones included.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.tokens.read().map_or(0, |tokens| tokens.len())
    }
}
