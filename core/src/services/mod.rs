//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, BcryptPasswordVerifier, PasswordVerifier};
pub use clock::{Clock, SystemClock};
pub use token::{
    CleanupResult, IssuedRefreshToken, RefreshTokenLifecycle, TokenCleanupConfig,
    TokenCleanupService, TokenServiceConfig, TokenSigner,
};
