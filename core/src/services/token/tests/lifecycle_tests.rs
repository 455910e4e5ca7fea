//! Unit tests for the refresh token lifecycle manager

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{InMemoryTokenRepository, MockTokenRepository, TokenRepository};
use crate::services::clock::{Clock, FixedClock};
use crate::services::token::{RefreshTokenLifecycle, TokenServiceConfig};

type TestLifecycle = RefreshTokenLifecycle<InMemoryTokenRepository, FixedClock>;

fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
    ))
}

fn lifecycle_with(
    config: TokenServiceConfig,
    clock: Arc<FixedClock>,
) -> (Arc<InMemoryTokenRepository>, TestLifecycle) {
    let repository = Arc::new(InMemoryTokenRepository::new());
    let lifecycle = RefreshTokenLifecycle::with_clock(repository.clone(), config, clock);
    (repository, lifecycle)
}

fn default_lifecycle() -> (Arc<InMemoryTokenRepository>, Arc<FixedClock>, TestLifecycle) {
    let clock = fixed_clock();
    let (repository, lifecycle) = lifecycle_with(TokenServiceConfig::default(), clock.clone());
    (repository, clock, lifecycle)
}

#[tokio::test]
async fn test_issue_creates_live_token() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    let issued = lifecycle.issue(owner).await.unwrap();

    assert_eq!(issued.token.len(), 32);
    assert_eq!(issued.entity.user_id, owner);
    assert!(issued.entity.is_live_at(clock.now()));
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_at_most_one_live_token_per_owner() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    lifecycle.issue(owner).await.unwrap();
    lifecycle.issue(owner).await.unwrap();
    let last = lifecycle.issue(owner).await.unwrap();

    let live = repository
        .count_live_tokens(owner, clock.now())
        .await
        .unwrap();
    assert_eq!(live, 1);

    // Superseded tokens are revoked, not deleted: history stays for audit
    assert_eq!(repository.len().await, 3);

    let survivor = repository
        .find_refresh_token(&last.entity.token_hash)
        .await
        .unwrap()
        .unwrap();
    assert!(!survivor.is_revoked);
}

#[tokio::test]
async fn test_issue_leaves_other_owners_untouched() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    lifecycle.issue(alice).await.unwrap();
    lifecycle.issue(bob).await.unwrap();
    lifecycle.issue(alice).await.unwrap();

    assert_eq!(
        repository.count_live_tokens(bob, clock.now()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_rotation_chain() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        revoke_all_on_reuse: false,
        ..Default::default()
    };
    let (repository, lifecycle) = lifecycle_with(config, clock.clone());
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();
    let t2 = lifecycle.rotate(&t1.token).await.unwrap();

    // The predecessor is revoked the moment its successor exists
    let old = repository
        .find_refresh_token(&t1.entity.token_hash)
        .await
        .unwrap()
        .unwrap();
    assert!(old.is_revoked);

    // Replaying the rotated-away token must never mint credentials
    let replay = lifecycle.rotate(&t1.token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));

    // The current token still rotates normally
    let t3 = lifecycle.rotate(&t2.token).await.unwrap();
    assert_ne!(t3.token, t2.token);
    assert_eq!(
        repository
            .count_live_tokens(owner, clock.now())
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_replay_cascades_revocation_when_enabled() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();
    let t2 = lifecycle.rotate(&t1.token).await.unwrap();

    // Replay of the dead token kills the whole session chain
    let replay = lifecycle.rotate(&t1.token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
    assert_eq!(
        repository
            .count_live_tokens(owner, clock.now())
            .await
            .unwrap(),
        0
    );

    let successor = lifecycle.rotate(&t2.token).await;
    assert!(matches!(
        successor,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_rotate_unknown_token() {
    let (_repository, _clock, lifecycle) = default_lifecycle();

    let result = lifecycle.rotate("no-such-token").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenNotFound))
    ));
}

#[tokio::test]
async fn test_rotate_expired_token() {
    let (_repository, clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();
    clock.advance(Duration::days(8));

    let result = lifecycle.rotate(&t1.token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[tokio::test]
async fn test_expired_token_does_not_cascade_revocation() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();
    clock.advance(Duration::days(8));

    // Expiry is a time trigger, not a theft signal: even with the cascade
    // policy on, the failed rotation leaves the row untouched
    let result = lifecycle.rotate(&t1.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    let stored = repository
        .find_refresh_token(&t1.entity.token_hash)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_revoked);
}

#[tokio::test]
async fn test_zero_ttl_token_is_immediately_unusable() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        refresh_token_expiry_seconds: 0,
        ..Default::default()
    };
    let (_repository, lifecycle) = lifecycle_with(config, clock);
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();
    let result = lifecycle.rotate(&t1.token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent_and_tolerates_unknown_tokens() {
    let (repository, _clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    let t1 = lifecycle.issue(owner).await.unwrap();

    lifecycle.revoke(&t1.token).await.unwrap();
    lifecycle.revoke(&t1.token).await.unwrap();
    lifecycle.revoke("never-existed").await.unwrap();

    let stored = repository
        .find_refresh_token(&t1.entity.token_hash)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_revoked);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_leaves_one_live_token() {
    let (repository, clock, lifecycle) = default_lifecycle();
    let lifecycle = Arc::new(lifecycle);
    let owner = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move { lifecycle.issue(owner).await }));
    }

    for handle in handles {
        // Both halves of the guarantee: every call completes without error
        handle.await.unwrap().unwrap();
    }

    assert_eq!(
        repository
            .count_live_tokens(owner, clock.now())
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_owner_lock_table_does_not_grow_with_owners() {
    let (_repository, _clock, lifecycle) = default_lifecycle();

    for _ in 0..16 {
        lifecycle.issue(Uuid::new_v4()).await.unwrap();
    }

    // Idle entries are evicted on the next acquisition; only the most
    // recent owner's entry can remain
    assert!(lifecycle.owner_lock_count() <= 1);
}

#[tokio::test]
async fn test_sweep_respects_strict_cutoff() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        refresh_token_expiry_seconds: 3600,
        ..Default::default()
    };
    let (repository, lifecycle) = lifecycle_with(config, clock.clone());
    let owner = Uuid::new_v4();

    lifecycle.issue(owner).await.unwrap();

    // At exactly expires_at the row is retained (deletion cutoff is strict)
    clock.advance(Duration::seconds(3600));
    assert_eq!(lifecycle.sweep_expired_now().await.unwrap(), 0);
    assert_eq!(repository.len().await, 1);

    clock.advance(Duration::seconds(1));
    assert_eq!(lifecycle.sweep_expired_now().await.unwrap(), 1);
    assert_eq!(repository.len().await, 0);
}

#[tokio::test]
async fn test_sweep_keeps_revoked_but_unexpired_tokens() {
    let (repository, _clock, lifecycle) = default_lifecycle();
    let owner = Uuid::new_v4();

    lifecycle.issue(owner).await.unwrap();
    lifecycle.issue(owner).await.unwrap();

    assert_eq!(lifecycle.sweep_expired_now().await.unwrap(), 0);
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn test_store_failure_is_fatal_to_the_call() {
    let repository = Arc::new(MockTokenRepository::new());
    let lifecycle = RefreshTokenLifecycle::with_clock(
        repository.clone(),
        TokenServiceConfig::default(),
        fixed_clock(),
    );
    let owner = Uuid::new_v4();

    repository.set_failing(true);

    let result = lifecycle.issue(owner).await;
    assert!(matches!(result, Err(DomainError::Database { .. })));

    let result = lifecycle.rotate("anything").await;
    assert!(matches!(result, Err(DomainError::Database { .. })));
}
