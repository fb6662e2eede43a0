//! # Infrastructure Layer
//!
//! Concrete persistence for the RentHub backend: a MySQL connection pool with
//! embedded migrations and sqlx implementations of the repository traits
//! defined in `rh_core`.

// Re-export core types for convenience
pub use rh_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlItemRepository, MySqlPaymentRepository, MySqlRentalRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
