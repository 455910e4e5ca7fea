//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// This trait defines the contract for managing refresh tokens in durable
/// storage. The store is deliberately dumb: it persists, looks up, flips the
/// revoked flag, and deletes. The single-live-token-per-owner invariant is
/// enforced above it by the lifecycle manager, not by storage constraints.
///
/// # Security Considerations
/// - Only token hashes are stored, never the opaque token strings
/// - Revoked tokens stay in the store until the expiry sweep deletes them,
///   keeping rotation history auditable
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token to the repository
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate hash, store unavailable)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Store error occurred
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all refresh tokens belonging to a user, live or dead
    ///
    /// Validity filtering is the caller's job since only the caller knows
    /// the current instant.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Revoke a specific refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - Token was revoked
    /// * `Ok(false)` - Token not found
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke all refresh tokens for a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete refresh tokens whose expiry lies strictly before `before`
    ///
    /// Revoked-but-unexpired tokens are retained; a token expiring exactly
    /// at `before` is retained.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired tokens deleted
    async fn delete_expired_tokens(&self, before: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count live (unrevoked, unexpired) tokens for a user at the given instant
    async fn count_live_tokens(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let tokens = self.find_by_user_id(user_id).await?;
        Ok(tokens.iter().filter(|t| t.is_live_at(now)).count())
    }
}
