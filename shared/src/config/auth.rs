//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

/// JWT access token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 900, // 15 minutes
            issuer: String::from("authkit"),
            audience: None,
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

/// Refresh token lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshTokenConfig {
    /// Refresh token expiry time in seconds
    pub expiry: i64,

    /// Whether presenting a revoked token cascade-revokes every token
    /// held by its owner
    #[serde(default = "default_revoke_all_on_reuse")]
    pub revoke_all_on_reuse: bool,

    /// How often the expiry sweep runs, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RefreshTokenConfig {
    fn default() -> Self {
        Self {
            expiry: 604_800, // 7 days
            revoke_all_on_reuse: default_revoke_all_on_reuse(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl RefreshTokenConfig {
    /// Set refresh token expiry in days
    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expiry = days * 86_400;
        self
    }
}

fn default_revoke_all_on_reuse() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    3600
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT access token settings
    pub jwt: JwtConfig,

    /// Refresh token lifecycle settings
    pub refresh_token: RefreshTokenConfig,
}
