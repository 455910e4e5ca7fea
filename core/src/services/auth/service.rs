//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::token::{RefreshTokenLifecycle, TokenSigner};

use super::config::AuthServiceConfig;
use super::password::PasswordVerifier;

/// Authentication service orchestrating the session credential flows
///
/// Every operation takes the caller's identity or token as an explicit
/// argument; there is no ambient session state.
pub struct AuthService<U, P, R, C>
where
    U: UserRepository,
    P: PasswordVerifier,
    R: TokenRepository,
    C: Clock,
{
    /// User directory for identity lookup and creation
    user_repository: Arc<U>,
    /// Credential verifier
    password_verifier: Arc<P>,
    /// Access token signer
    token_signer: Arc<TokenSigner>,
    /// Refresh token lifecycle manager
    token_lifecycle: Arc<RefreshTokenLifecycle<R, C>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, P, R, C> AuthService<U, P, R, C>
where
    U: UserRepository,
    P: PasswordVerifier,
    R: TokenRepository,
    C: Clock,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        password_verifier: Arc<P>,
        token_signer: Arc<TokenSigner>,
        token_lifecycle: Arc<RefreshTokenLifecycle<R, C>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_verifier,
            token_signer,
            token_lifecycle,
            config,
        }
    }

    /// Register a new user and issue their first credential pair
    ///
    /// # Errors
    ///
    /// * `AuthError::UserAlreadyExists` - the email is already registered
    /// * `AuthError::RegistrationDisabled` - registrations are switched off
    /// * `DomainError::Validation` - the email is not usable as an identity
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> DomainResult<AuthResponse> {
        if !self.config.registration_enabled {
            return Err(DomainError::Auth(AuthError::RegistrationDisabled));
        }

        let email = normalize_email(email)?;

        if self.user_repository.exists_by_email(&email).await? {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        let password_hash = self.password_verifier.hash(password)?;
        let user = User::new(email, password_hash, full_name.trim().to_string());
        let user = self.user_repository.create(user).await?;

        info!(user_id = %user.id, "user registered");

        self.issue_session(&user).await
    }

    /// Authenticate a user and issue a credential pair
    ///
    /// Unknown email and wrong password fail identically so a caller
    /// cannot probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::AuthenticationFailed))?;

        if !self.password_verifier.verify(password, &user.password_hash) {
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        debug!(user_id = %user.id, "login succeeded");

        self.issue_session(&user).await
    }

    /// Rotate a refresh token and mint a new credential pair
    ///
    /// Every lifecycle failure - missing, revoked, or expired token -
    /// surfaces as `AuthError::SessionExpired`; the caller only learns
    /// that re-authentication is required. Store failures propagate
    /// unchanged.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let issued = match self.token_lifecycle.rotate(refresh_token).await {
            Ok(issued) => issued,
            Err(DomainError::Token(_)) => {
                return Err(DomainError::Auth(AuthError::SessionExpired));
            }
            Err(e) => return Err(e),
        };

        let access_token = self.token_signer.sign(issued.entity.user_id)?;
        let pair = TokenPair::new(
            access_token,
            issued.token,
            self.token_signer_access_expiry(),
            self.refresh_expiry(),
        );

        Ok(AuthResponse::from_token_pair(pair, issued.entity.user_id))
    }

    /// Revoke a refresh token, ending the session
    ///
    /// Logout of an already-invalid session succeeds; only a store
    /// failure surfaces.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        self.token_lifecycle.revoke(refresh_token).await
    }

    async fn issue_session(&self, user: &User) -> DomainResult<AuthResponse> {
        let issued = self.token_lifecycle.issue(user.id).await?;
        let access_token = self.token_signer.sign(user.id)?;

        let pair = TokenPair::new(
            access_token,
            issued.token,
            self.token_signer_access_expiry(),
            self.refresh_expiry(),
        );

        Ok(AuthResponse::from_token_pair(pair, user.id))
    }

    fn token_signer_access_expiry(&self) -> i64 {
        self.token_lifecycle.config().access_token_expiry_seconds
    }

    fn refresh_expiry(&self) -> i64 {
        self.token_lifecycle.config().refresh_token_expiry_seconds
    }
}

/// Normalizes an email into its canonical identity form
fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation {
            message: "Invalid email address".to_string(),
        });
    }
    Ok(email)
}
