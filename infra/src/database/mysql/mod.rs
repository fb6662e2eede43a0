//! MySQL repository implementations
//!
//! Ids are stored as `CHAR(36)` strings and statuses as lowercase strings;
//! the helpers here convert row columns back into domain types.

pub mod item_repository_impl;
pub mod payment_repository_impl;
pub mod rental_repository_impl;

pub use item_repository_impl::MySqlItemRepository;
pub use payment_repository_impl::MySqlPaymentRepository;
pub use rental_repository_impl::MySqlRentalRepository;

use rh_core::errors::DomainError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use uuid::Uuid;

/// Maps a driver error to `DomainError::Database`, logging the cause
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, context, "Database query failed");
        DomainError::database(format!("{}: {}", context, e))
    }
}

/// Whether the error is a duplicate key (MySQL error 1062)
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether the error is a missing foreign key parent (MySQL error 1452)
pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", name, e),
    })
}

/// Parses a status column with the entity's `FromStr`
pub(crate) fn status_column<S>(row: &MySqlRow, name: &str) -> Result<S, DomainError>
where
    S: std::str::FromStr<Err = DomainError>,
{
    let raw: String = column(row, name)?;
    raw.parse().map_err(|e: DomainError| DomainError::Internal {
        message: format!("Invalid {}: {}", name, e),
    })
}

pub(crate) fn count(row: &MySqlRow) -> Result<u64, DomainError> {
    let total: i64 = column(row, "total")?;
    Ok(total.max(0) as u64)
}
