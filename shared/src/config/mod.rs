//! Configuration module
//!
//! Configuration is organized by concern:
//! - `auth` - JWT signing and refresh token lifecycle configuration

pub mod auth;

pub use auth::{AuthConfig, JwtConfig, RefreshTokenConfig};
