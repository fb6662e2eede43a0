//! Configuration module with business-specific sub-modules
//!
//! - `auth` - bearer token verification settings
//! - `database` - database connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server, CORS and storage backend selection

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig, StorageBackend};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Which repository implementation backs the services
    pub storage: StorageBackend,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Missing or unparsable variables fall back to their defaults; the
    /// `.env` file should already have been loaded by the caller.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            storage: StorageBackend::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::from_env(environment),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
