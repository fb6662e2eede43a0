//! Payment use cases.
//!
//! Creation enforces the marketplace's consistency rules: the rental must
//! exist, a rental carries at most one payment, the amount is positive and
//! the method is a non-empty string once trimmed.

use std::sync::Arc;

use rh_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::payment::{
    NewPayment, Payment, PaymentChanges, PaymentStatus, PaymentWithRental,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{PaymentRepository, RentalRepository};

/// Service for recording and maintaining rental payments
pub struct PaymentService<R, P>
where
    R: RentalRepository,
    P: PaymentRepository,
{
    rental_repository: Arc<R>,
    payment_repository: Arc<P>,
}

impl<R, P> PaymentService<R, P>
where
    R: RentalRepository,
    P: PaymentRepository,
{
    pub fn new(rental_repository: Arc<R>, payment_repository: Arc<P>) -> Self {
        Self {
            rental_repository,
            payment_repository,
        }
    }

    /// Record the payment for a rental
    ///
    /// # Errors
    /// * `NotFound` - the rental does not exist
    /// * `Conflict` - the rental already has a payment
    /// * `Validation` - non-positive amount or blank method
    pub async fn create_payment(&self, input: NewPayment) -> DomainResult<PaymentWithRental> {
        let rental = self
            .rental_repository
            .find_by_id(input.rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))?;

        if self
            .payment_repository
            .exists_for_rental(rental.id)
            .await?
        {
            return Err(DomainError::conflict(
                "Payment already exists for this rental",
            ));
        }

        let payment = Payment::new(input.normalized()?);
        let payment = self.payment_repository.create(payment).await?;
        tracing::info!(
            payment_id = %payment.id,
            rental_id = %rental.id,
            status = %payment.status,
            "payment recorded"
        );
        Ok(PaymentWithRental {
            payment,
            rental: rental.summary(),
        })
    }

    pub async fn get_payment(&self, id: Uuid) -> DomainResult<PaymentWithRental> {
        self.payment_repository
            .find_with_rental(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))
    }

    /// The payment settling a rental
    pub async fn get_payment_for_rental(
        &self,
        rental_id: Uuid,
    ) -> DomainResult<PaymentWithRental> {
        if self.rental_repository.find_by_id(rental_id).await?.is_none() {
            return Err(DomainError::not_found("Rental"));
        }
        self.payment_repository
            .find_by_rental(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))
    }

    pub async fn list_payments(
        &self,
        status: Option<PaymentStatus>,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<PaymentWithRental>> {
        let pagination = pagination.validate();
        let (rows, total) = self.payment_repository.list(status, pagination).await?;
        Ok(PaginatedResponse::new(rows, pagination, total))
    }

    /// Update amount, method or status, validating provided fields the same
    /// way as on creation
    pub async fn update_payment(
        &self,
        id: Uuid,
        changes: PaymentChanges,
    ) -> DomainResult<PaymentWithRental> {
        let changes = changes.normalized()?;
        let PaymentWithRental {
            mut payment,
            rental,
        } = self.get_payment(id).await?;

        payment.apply(changes)?;
        let payment = self.payment_repository.update(payment).await?;
        tracing::info!(payment_id = %id, status = %payment.status, "payment updated");
        Ok(PaymentWithRental { payment, rental })
    }

    pub async fn delete_payment(&self, id: Uuid) -> DomainResult<()> {
        if !self.payment_repository.delete(id).await? {
            return Err(DomainError::not_found("Payment"));
        }
        tracing::info!(payment_id = %id, "payment deleted");
        Ok(())
    }
}
