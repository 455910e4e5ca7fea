//! Mock implementation of TokenRepository for testing
//!
//! Wraps the in-memory store with fault injection so tests can exercise
//! store-failure paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::memory::InMemoryTokenRepository;
use super::r#trait::TokenRepository;

/// Mock token repository with switchable failure mode
pub struct MockTokenRepository {
    inner: InMemoryTokenRepository,
    failing: AtomicBool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            inner: InMemoryTokenRepository::new(),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail with a store error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "injected store failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check()?;
        self.inner.save_refresh_token(token).await
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        self.check()?;
        self.inner.find_refresh_token(token_hash).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        self.check()?;
        self.inner.find_by_user_id(user_id).await
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.check()?;
        self.inner.revoke_token(token_hash).await
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.check()?;
        self.inner.revoke_all_user_tokens(user_id).await
    }

    async fn delete_expired_tokens(&self, before: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check()?;
        self.inner.delete_expired_tokens(before).await
    }
}
