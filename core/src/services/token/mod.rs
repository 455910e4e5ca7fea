//! Token service module
//!
//! This module handles all token-related operations:
//! - JWT access token signing and verification
//! - Refresh token lifecycle: issue, rotate, revoke, expiry sweep
//! - Background cleanup of expired tokens

mod cleanup;
mod config;
mod lifecycle;
mod signer;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use lifecycle::{IssuedRefreshToken, RefreshTokenLifecycle};
pub use signer::TokenSigner;
