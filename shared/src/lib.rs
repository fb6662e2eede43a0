//! Shared utilities and common types for the RentHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope and pagination types

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig, StorageBackend,
};
pub use types::{ApiResponse, PaginatedResponse, Pagination};
