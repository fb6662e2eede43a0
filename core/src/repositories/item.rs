//! Item repository trait.

use async_trait::async_trait;
use rh_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::item::{Item, ItemFilter};
use crate::errors::DomainError;

/// Repository trait for Item persistence operations
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn create(&self, item: Item) -> Result<Item, DomainError>;

    /// Find an item by id
    ///
    /// # Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - No item with this id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError>;

    /// One page of items matching the filter, newest first, plus the total
    /// number of matches
    async fn list(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError>;

    /// Overwrite an existing item
    ///
    /// Fails with `NotFound` when the item no longer exists.
    async fn update(&self, item: Item) -> Result<Item, DomainError>;

    /// Delete an item; `Ok(false)` when it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Number of items listed by an owner
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError>;
}
