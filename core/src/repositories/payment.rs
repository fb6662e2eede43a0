//! Payment repository trait.

use async_trait::async_trait;
use rh_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::payment::{Payment, PaymentStatus, PaymentWithRental};
use crate::errors::DomainError;

/// Repository trait for Payment persistence operations
///
/// Implementations must keep `rental_id` unique and report a second payment
/// for the same rental as `DomainError::Conflict`.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new payment
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError>;

    /// Find a payment joined with its rental summary
    async fn find_with_rental(&self, id: Uuid) -> Result<Option<PaymentWithRental>, DomainError>;

    /// The payment settling a rental, joined with the rental summary
    async fn find_by_rental(
        &self,
        rental_id: Uuid,
    ) -> Result<Option<PaymentWithRental>, DomainError>;

    async fn exists_for_rental(&self, rental_id: Uuid) -> Result<bool, DomainError>;

    /// One page of payments, newest first, optionally filtered by status
    async fn list(
        &self,
        status: Option<PaymentStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<PaymentWithRental>, u64), DomainError>;

    /// Overwrite an existing payment
    async fn update(&self, payment: Payment) -> Result<Payment, DomainError>;

    /// Delete a payment; `Ok(false)` when it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete the payment of a rental, if any
    async fn delete_by_rental(&self, rental_id: Uuid) -> Result<bool, DomainError>;

    /// Sum of completed payments on rentals booked by a renter
    async fn total_completed_for_renter(&self, renter_id: Uuid) -> Result<f64, DomainError>;
}
