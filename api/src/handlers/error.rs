//! Error to HTTP response mapping
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}` with
//! a status derived from the domain error. Server-side failures are logged
//! and replaced by a generic message.

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use rh_core::errors::DomainError;
use rh_shared::ApiResponse;
use uuid::Uuid;
use validator::ValidationErrors;

/// Error type returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request: unparsable body, query, path or failed DTO checks
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Message safe to show to the client
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(error) if error.is_server_error() => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(validation_message(&errors))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(error) => match error {
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict { .. } => StatusCode::CONFLICT,
                DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::Database { .. } | DomainError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        HttpResponse::build(status).json(ApiResponse::error(self.public_message()))
    }
}

/// Parses a path id, answering 400 `Invalid <resource> id` when malformed
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} id", resource)))
}

/// Flattens field errors into `field: message` pairs, sorted by field
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{}: {}", field, message)
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid request body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid query parameters: {}", err)).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid path: {}", err)).into()
}
