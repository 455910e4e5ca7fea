//! Authentication and token error types.
//!
//! Error messages here are terse and stable; presentation-layer mapping to
//! user-facing responses goes through `ErrorResponse` and the shared error
//! codes.

use ak_shared::types::response::ErrorResponse;
use ak_shared::types::response::error_codes;
use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent failures at the session issuance boundary.
/// Refresh failures are deliberately collapsed into `SessionExpired` so a
/// caller cannot distinguish a missing, revoked, or expired refresh token.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Session expired")]
    SessionExpired,

    #[error("Registration disabled")]
    RegistrationDisabled,
}

/// Token-related errors
///
/// These errors are typed for the lifecycle manager and signer; the
/// orchestrator maps them to boundary-level outcomes before they reach a
/// caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token not found")]
    TokenNotFound,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::AuthenticationFailed => error_codes::AUTHENTICATION_FAILED,
            AuthError::AccountDisabled => error_codes::ACCOUNT_DISABLED,
            AuthError::SessionExpired => error_codes::SESSION_EXPIRED,
            AuthError::RegistrationDisabled => error_codes::AUTHENTICATION_FAILED,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::TokenNotFound
            | TokenError::TokenRevoked
            | TokenError::InvalidSignature
            | TokenError::InvalidTokenFormat => error_codes::INVALID_TOKEN,
            TokenError::TokenGenerationFailed => error_codes::INTERNAL_ERROR,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
