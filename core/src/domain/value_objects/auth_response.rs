//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;

/// Authentication response containing tokens and the owning identity
///
/// Returned after successful registration, login, and refresh. The pair is
/// assembled per call and never persisted as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Token type for the Authorization header
    pub token_type: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,

    /// The authenticated user's ID
    pub user_id: Uuid,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair
    pub fn from_token_pair(pair: TokenPair, user_id: Uuid) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.access_expires_in,
            user_id,
        }
    }
}
