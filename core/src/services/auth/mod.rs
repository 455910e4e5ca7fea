//! Session issuance orchestration
//!
//! Composes the user directory, password verifier, token signer, and
//! refresh token lifecycle into the register/login/refresh/logout flows.

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{BcryptPasswordVerifier, PasswordVerifier};
pub use service::AuthService;
