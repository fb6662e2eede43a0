//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Every service operation returns one of these; the presentation layer maps
/// each variant to an HTTP status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Whether the error is caused by the server rather than the request
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::Internal { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
