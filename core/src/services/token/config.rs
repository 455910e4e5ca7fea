//! Configuration for the token services

use jsonwebtoken::Algorithm;

use ak_shared::config::AuthConfig;

use crate::domain::entities::token::{JWT_AUDIENCE, JWT_ISSUER};

/// Configuration shared by the token signer and the refresh token lifecycle
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
    /// Access token expiry in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_seconds: i64,
    /// Whether presenting a revoked refresh token cascade-revokes every
    /// token of its owner (token-theft replay defense); an expired token
    /// never cascades
    pub revoke_all_on_reuse: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_expiry_seconds: 900,
            refresh_token_expiry_seconds: 7 * 24 * 60 * 60,
            revoke_all_on_reuse: true,
        }
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            jwt_secret: config.jwt.secret.clone(),
            algorithm: config.jwt.algorithm.parse().unwrap_or(Algorithm::HS256),
            issuer: config.jwt.issuer.clone(),
            audience: config
                .jwt
                .audience
                .clone()
                .unwrap_or_else(|| JWT_AUDIENCE.to_string()),
            access_token_expiry_seconds: config.jwt.access_token_expiry,
            refresh_token_expiry_seconds: config.refresh_token.expiry,
            revoke_all_on_reuse: config.refresh_token.revoke_all_on_reuse,
        }
    }
}
