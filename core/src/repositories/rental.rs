//! Rental repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use rh_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::rental::{Rental, RentalStatus, RentalWithItem};
use crate::errors::DomainError;

/// Repository trait for Rental persistence operations
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Persist a new rental
    async fn create(&self, rental: Rental) -> Result<Rental, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError>;

    /// Find a rental joined with its item's summary
    async fn find_with_item(&self, id: Uuid) -> Result<Option<RentalWithItem>, DomainError>;

    /// Rentals booked by a renter, newest first
    async fn list_by_renter(
        &self,
        renter_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError>;

    /// Rentals of items listed by an owner, newest first
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError>;

    /// Whether a pending or active rental of the item overlaps `[start, end)`
    async fn has_open_overlap(
        &self,
        item_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, DomainError>;

    /// Whether the item has any pending or active rental
    async fn has_open_rentals(&self, item_id: Uuid) -> Result<bool, DomainError>;

    /// Persist a status change
    async fn update_status(
        &self,
        id: Uuid,
        status: RentalStatus,
    ) -> Result<bool, DomainError>;

    /// Delete a rental; `Ok(false)` when it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Number of rentals booked by a renter, optionally only in one status
    async fn count_by_renter(
        &self,
        renter_id: Uuid,
        status: Option<RentalStatus>,
    ) -> Result<u64, DomainError>;

    /// Number of rentals of items listed by an owner
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError>;
}
