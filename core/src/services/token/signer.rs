//! Stateless JWT access token signing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies access tokens
///
/// Pure with respect to state: a signer never touches the token store, and
/// verification depends only on the token string, the key, and the clock.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    algorithm: jsonwebtoken::Algorithm,
}

impl TokenSigner {
    /// Creates a new signer from a symmetric-key configuration
    pub fn new(config: &TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: Duration::seconds(config.access_token_expiry_seconds),
            algorithm: config.algorithm,
        }
    }

    /// Signs an access token for a user with the configured TTL
    pub fn sign(&self, user_id: Uuid) -> Result<String, DomainError> {
        self.sign_with_ttl(user_id, self.access_ttl)
    }

    /// Signs an access token with an explicit TTL
    pub fn sign_with_ttl(&self, user_id: Uuid, ttl: Duration) -> Result<String, DomainError> {
        let claims =
            Claims::new_access_token(user_id, Utc::now(), ttl, &self.issuer, &self.audience);
        self.encode(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if signature and expiry check out
    /// * `Err(DomainError::Token)` - Token is expired, tampered, or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }
}
