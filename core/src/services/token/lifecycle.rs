//! Refresh token lifecycle management.
//!
//! The state machine per token is `Live` -> `Revoked` (explicit revoke, or
//! superseded by issue/rotate) or `Expired` (time-triggered, checked lazily
//! at use) -> deleted by the expiry sweep. Only live tokens rotate.
//!
//! The module guarantees that an owner holds at most one live refresh token
//! at any instant. The revoke-then-create transition inside `issue` and
//! `rotate` runs under a per-owner async lock; operations for different
//! owners never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenServiceConfig;

/// Length of the opaque refresh token string (alphanumeric, ~190 bits of entropy)
const OPAQUE_TOKEN_LENGTH: usize = 32;

/// A freshly minted refresh token
///
/// `token` is the opaque string handed to the client; it exists only here
/// and in transit. `entity` is what the store persisted (hash only).
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    /// Plaintext opaque token for the client
    pub token: String,
    /// The persisted record
    pub entity: RefreshToken,
}

/// The refresh token lifecycle manager
pub struct RefreshTokenLifecycle<R: TokenRepository, C: Clock = SystemClock> {
    repository: Arc<R>,
    clock: Arc<C>,
    config: TokenServiceConfig,
    /// Arena-style per-owner lock table serializing revoke-then-create
    /// transitions for a single owner
    owner_locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl<R: TokenRepository> RefreshTokenLifecycle<R> {
    /// Creates a lifecycle manager on the system clock
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }
}

impl<R: TokenRepository, C: Clock> RefreshTokenLifecycle<R, C> {
    /// Creates a lifecycle manager with an injected clock
    pub fn with_clock(repository: Arc<R>, config: TokenServiceConfig, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config,
            owner_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Issues a fresh refresh token for an owner
    ///
    /// Any live token the owner still holds is revoked (not deleted) before
    /// the new one is persisted, so the single-live-token invariant holds
    /// across the whole transition. Concurrent `issue` calls for the same
    /// owner serialize; both complete without error and exactly one live
    /// token remains.
    pub async fn issue(&self, owner: Uuid) -> DomainResult<IssuedRefreshToken> {
        let lock = self.owner_lock(owner);
        let _guard = lock.lock().await;

        self.issue_locked(owner).await
    }

    /// Rotates a refresh token: replace-on-use
    ///
    /// * `TokenError::TokenNotFound` - no token with this value exists
    /// * `TokenError::TokenRevoked` / `TokenError::TokenExpired` - the token
    ///   is dead; a dead token must never mint new credentials
    ///
    /// Presentation of a revoked token is the strongest available signal of
    /// replay after theft: when `revoke_all_on_reuse` is set, every token of
    /// the owner is revoked before the error returns, forcing a fresh login.
    pub async fn rotate(&self, token: &str) -> DomainResult<IssuedRefreshToken> {
        let token_hash = hash_token(token);

        let found = self
            .repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        let lock = self.owner_lock(found.user_id);
        let _guard = lock.lock().await;

        // Re-read under the lock: a concurrent rotation may have revoked
        // this token while we were acquiring it
        let current = self
            .repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        if current.is_revoked {
            if self.config.revoke_all_on_reuse {
                warn!(
                    user_id = %current.user_id,
                    token_id = %current.id,
                    "revoked refresh token presented, revoking all tokens for owner"
                );
                self.repository
                    .revoke_all_user_tokens(current.user_id)
                    .await?;
            }
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        let now = self.clock.now();
        if current.is_expired_at(now) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        self.issue_locked(current.user_id).await
    }

    /// Revokes a refresh token
    ///
    /// A missing or already-revoked token is not an error: logging out of a
    /// session that is already invalid must not surface as failure.
    pub async fn revoke(&self, token: &str) -> DomainResult<()> {
        let token_hash = hash_token(token);
        self.repository.revoke_token(&token_hash).await?;
        Ok(())
    }

    /// Deletes every token whose expiry lies strictly before `now`
    ///
    /// Housekeeping only: revoked-but-unexpired tokens are retained for
    /// audit, and correctness never depends on the sweep having run.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        self.repository.delete_expired_tokens(now).await
    }

    /// Runs the sweep against the current clock
    pub async fn sweep_expired_now(&self) -> DomainResult<usize> {
        self.sweep_expired(self.clock.now()).await
    }

    /// The configuration this manager was built with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// The revoke-then-create transition; callers must hold the owner's lock
    async fn issue_locked(&self, owner: Uuid) -> DomainResult<IssuedRefreshToken> {
        self.repository.revoke_all_user_tokens(owner).await?;

        let token = generate_opaque_token();
        let now = self.clock.now();
        let entity = RefreshToken::new(
            owner,
            hash_token(&token),
            now,
            Duration::seconds(self.config.refresh_token_expiry_seconds),
        );

        let entity = self.repository.save_refresh_token(entity).await?;

        Ok(IssuedRefreshToken { token, entity })
    }

    fn owner_lock(&self, owner: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut table = match self.owner_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Evict entries no task holds so the table does not grow with
        // every owner ever seen
        table.retain(|_, lock| Arc::strong_count(lock) > 1);
        table
            .entry(owner)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn owner_lock_count(&self) -> usize {
        match self.owner_locks.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

/// Generates a random alphanumeric opaque token string
fn generate_opaque_token() -> String {
    let mut rng = rand::thread_rng();
    (0..OPAQUE_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..=9 => (b'0' + idx) as char,
                10..=35 => (b'a' + idx - 10) as char,
                _ => (b'A' + idx - 36) as char,
            }
        })
        .collect()
}

/// Hashes an opaque token for storage lookup
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
