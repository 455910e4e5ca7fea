//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether new registrations are accepted
    pub registration_enabled: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            registration_enabled: true,
        }
    }
}
