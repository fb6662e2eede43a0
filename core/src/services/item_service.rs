//! Item listing use cases.

use std::sync::Arc;

use rh_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::item::{Item, ItemChanges, ItemFilter, NewItem};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ItemRepository, RentalRepository};

/// Service for creating and maintaining item listings
pub struct ItemService<I, R>
where
    I: ItemRepository,
    R: RentalRepository,
{
    item_repository: Arc<I>,
    /// Consulted before deleting an item
    rental_repository: Arc<R>,
}

impl<I, R> ItemService<I, R>
where
    I: ItemRepository,
    R: RentalRepository,
{
    pub fn new(item_repository: Arc<I>, rental_repository: Arc<R>) -> Self {
        Self {
            item_repository,
            rental_repository,
        }
    }

    /// List a new item owned by `owner_id`
    pub async fn create_item(&self, owner_id: Uuid, input: NewItem) -> DomainResult<Item> {
        let item = Item::new(owner_id, input.normalized()?);
        let item = self.item_repository.create(item).await?;
        tracing::info!(item_id = %item.id, owner_id = %owner_id, "item listed");
        Ok(item)
    }

    pub async fn get_item(&self, id: Uuid) -> DomainResult<Item> {
        self.item_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item"))
    }

    pub async fn list_items(
        &self,
        filter: ItemFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Item>> {
        let pagination = pagination.validate();
        let (items, total) = self
            .item_repository
            .list(&filter.normalized(), pagination)
            .await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    /// Apply a partial update; only the owner may change an item
    pub async fn update_item(
        &self,
        actor_id: Uuid,
        id: Uuid,
        changes: ItemChanges,
    ) -> DomainResult<Item> {
        let changes = changes.normalized()?;
        let mut item = self.get_item(id).await?;
        if !item.is_owned_by(actor_id) {
            return Err(DomainError::forbidden("Only the owner can modify this item"));
        }

        item.apply(changes);
        self.item_repository.update(item).await
    }

    /// Delete an item that has no pending or active rentals
    pub async fn delete_item(&self, actor_id: Uuid, id: Uuid) -> DomainResult<()> {
        let item = self.get_item(id).await?;
        if !item.is_owned_by(actor_id) {
            return Err(DomainError::forbidden("Only the owner can delete this item"));
        }
        if self.rental_repository.has_open_rentals(id).await? {
            return Err(DomainError::conflict(
                "Item has pending or active rentals",
            ));
        }

        if !self.item_repository.delete(id).await? {
            return Err(DomainError::not_found("Item"));
        }
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }
}
