//! Bearer token verification configuration
//!
//! Tokens are issued by the external identity provider; the API only
//! verifies the HS256 signature and the standard time claims.

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared secret used to verify token signatures
    pub jwt_secret: String,

    /// Expected `iss` claim, if the provider sets one
    #[serde(default)]
    pub issuer: Option<String>,

    /// Allowed clock skew in seconds when checking `exp`/`nbf`
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_SECRET.to_string(),
            issuer: None,
            leeway_seconds: default_leeway(),
        }
    }
}

impl AuthConfig {
    /// Create a configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            issuer: std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
            leeway_seconds: std::env::var("JWT_LEEWAY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.leeway_seconds),
        }
    }

    /// Require a specific issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Check if using the built-in development secret
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

fn default_leeway() -> u64 {
    30
}
