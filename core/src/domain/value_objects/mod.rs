//! Value objects returned at the service boundary.

pub mod auth_response;

pub use auth_response::AuthResponse;
