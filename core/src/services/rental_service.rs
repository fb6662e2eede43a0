//! Rental booking use cases.

use std::sync::Arc;

use rh_shared::{PaginatedResponse, Pagination};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::rental::{NewRental, Rental, RentalStatus, RentalWithItem};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ItemRepository, PaymentRepository, RentalRepository};

/// Which side of a rental the caller is listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalRole {
    /// Rentals the caller booked
    #[default]
    Renter,
    /// Rentals of items the caller listed
    Owner,
}

/// Service for booking items and moving rentals through their lifecycle
pub struct RentalService<I, R, P>
where
    I: ItemRepository,
    R: RentalRepository,
    P: PaymentRepository,
{
    item_repository: Arc<I>,
    rental_repository: Arc<R>,
    payment_repository: Arc<P>,
}

impl<I, R, P> RentalService<I, R, P>
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

    /// Book an item for `[start_date, end_date)`
    ///
    /// The item must exist, be available, belong to someone else and have no
    /// pending or active rental overlapping the requested days.
    pub async fn create_rental(
        &self,
        renter_id: Uuid,
        input: NewRental,
    ) -> DomainResult<RentalWithItem> {
        input.days()?;

        let item = self
            .item_repository
            .find_by_id(input.item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item"))?;
        if item.is_owned_by(renter_id) {
            return Err(DomainError::validation("You cannot rent your own item"));
        }
        if !item.is_available {
            return Err(DomainError::conflict("Item is not available for rent"));
        }
        if self
            .rental_repository
            .has_open_overlap(item.id, input.start_date, input.end_date)
            .await?
        {
            return Err(DomainError::conflict(
                "Item is already booked for the requested dates",
            ));
        }

        let rental = Rental::new(&item, renter_id, &input)?;
        let rental = self.rental_repository.create(rental).await?;
        tracing::info!(
            rental_id = %rental.id,
            item_id = %item.id,
            days = rental.days(),
            "rental created"
        );
        Ok(RentalWithItem {
            rental,
            item: item.summary(),
        })
    }

    /// Fetch a rental visible to the caller
    ///
    /// Rentals the caller is not a party to are reported as missing.
    pub async fn get_rental(&self, actor_id: Uuid, id: Uuid) -> DomainResult<RentalWithItem> {
        let found = self.find(id).await?;
        if found.rental.renter_id != actor_id && found.item.owner_id != actor_id {
            return Err(DomainError::not_found("Rental"));
        }
        Ok(found)
    }

    pub async fn list_rentals(
        &self,
        actor_id: Uuid,
        role: RentalRole,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<RentalWithItem>> {
        let pagination = pagination.validate();
        let (rows, total) = match role {
            RentalRole::Renter => {
                self.rental_repository
                    .list_by_renter(actor_id, pagination)
                    .await?
            }
            RentalRole::Owner => {
                self.rental_repository
                    .list_by_owner(actor_id, pagination)
                    .await?
            }
        };
        Ok(PaginatedResponse::new(rows, pagination, total))
    }

    /// Move a rental to `status`
    ///
    /// The item owner may perform any allowed transition; the renter may only
    /// cancel.
    pub async fn update_status(
        &self,
        actor_id: Uuid,
        id: Uuid,
        status: RentalStatus,
    ) -> DomainResult<RentalWithItem> {
        let mut found = self.get_rental(actor_id, id).await?;
        let is_owner = found.item.owner_id == actor_id;
        if !is_owner && status != RentalStatus::Cancelled {
            return Err(DomainError::forbidden("Renters can only cancel a rental"));
        }

        found.rental.transition_to(status)?;
        if !self.rental_repository.update_status(id, status).await? {
            return Err(DomainError::not_found("Rental"));
        }
        tracing::info!(rental_id = %id, status = %status, "rental status changed");
        Ok(found)
    }

    /// Delete a pending or cancelled rental booked by the caller, along with
    /// its payment
    pub async fn delete_rental(&self, actor_id: Uuid, id: Uuid) -> DomainResult<()> {
        let found = self.get_rental(actor_id, id).await?;
        if found.rental.renter_id != actor_id {
            return Err(DomainError::forbidden("Only the renter can delete a rental"));
        }
        if !matches!(
            found.rental.status,
            RentalStatus::Pending | RentalStatus::Cancelled
        ) {
            return Err(DomainError::conflict(format!(
                "Cannot delete a {} rental",
                found.rental.status
            )));
        }

        self.payment_repository.delete_by_rental(id).await?;
        if !self.rental_repository.delete(id).await? {
            return Err(DomainError::not_found("Rental"));
        }
        tracing::info!(rental_id = %id, "rental deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<RentalWithItem> {
        self.rental_repository
            .find_with_item(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))
    }
}
