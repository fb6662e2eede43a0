//! Per-user dashboard figures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::rental::RentalStatus;
use crate::errors::DomainResult;
use crate::repositories::{ItemRepository, PaymentRepository, RentalRepository};

/// Counts shown on a user's profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub items_listed: u64,
    pub rentals_as_renter: u64,
    pub active_rentals_as_renter: u64,
    pub rentals_as_owner: u64,
    /// Completed payments on the user's own bookings
    pub total_paid: f64,
}

pub struct AccountService<I, R, P>
where
    I: ItemRepository,
    R: RentalRepository,
    P: PaymentRepository,
{
    item_repository: Arc<I>,
    rental_repository: Arc<R>,
    payment_repository: Arc<P>,
}

impl<I, R, P> AccountService<I, R, P>
where
    I: ItemRepository,
    R: RentalRepository,
    P: PaymentRepository,
{
    pub fn new(
        item_repository: Arc<I>,
        rental_repository: Arc<R>,
        payment_repository: Arc<P>,
    ) -> Self {
        Self {
            item_repository,
            rental_repository,
            payment_repository,
        }
    }

    pub async fn summary(&self, user_id: Uuid) -> DomainResult<AccountSummary> {
        Ok(AccountSummary {
            items_listed: self.item_repository.count_by_owner(user_id).await?,
            rentals_as_renter: self
                .rental_repository
                .count_by_renter(user_id, None)
                .await?,
            active_rentals_as_renter: self
                .rental_repository
                .count_by_renter(user_id, Some(RentalStatus::Active))
                .await?,
            rentals_as_owner: self.rental_repository.count_by_owner(user_id).await?,
            total_paid: self
                .payment_repository
                .total_completed_for_renter(user_id)
                .await?,
        })
    }
}
