//! MySQL implementation of the ItemRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rh_core::domain::entities::item::{Item, ItemFilter};
use rh_core::errors::DomainError;
use rh_core::repositories::ItemRepository;
use rh_shared::Pagination;

use super::{column, count, db_error, uuid_column};

const ITEM_COLUMNS: &str = "id, owner_id, title, description, category, daily_rate, \
                            location, is_available, created_at, updated_at";

/// MySQL implementation of ItemRepository
pub struct MySqlItemRepository {
    pool: MySqlPool,
}

impl MySqlItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &MySqlRow) -> Result<Item, DomainError> {
        Ok(Item {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            category: column(row, "category")?,
            daily_rate: column(row, "daily_rate")?,
            location: column(row, "location")?,
            is_available: column(row, "is_available")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

/// Appends the filter's conditions to a query ending in a `WHERE` clause
pub(crate) fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &ItemFilter) {
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(available) = filter.available {
        builder.push(" AND is_available = ").push_bind(available);
    }
    if let Some(owner_id) = filter.owner_id {
        builder.push(" AND owner_id = ").push_bind(owner_id.to_string());
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let query = r#"
            INSERT INTO items (
                id, owner_id, title, description, category, daily_rate,
                location, is_available, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(item.id.to_string())
            .bind(item.owner_id.to_string())
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.category)
            .bind(item.daily_rate)
            .bind(&item.location)
            .bind(item.is_available)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to create item"))?;

        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let query = format!("SELECT {} FROM items WHERE id = ? LIMIT 1", ITEM_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find item"))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let mut counter =
            QueryBuilder::<MySql>::new("SELECT COUNT(*) AS total FROM items WHERE 1 = 1");
        push_filter(&mut counter, filter);
        let total = counter
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count items"))?;

        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM items WHERE 1 = 1", ITEM_COLUMNS));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list items"))?;

        let items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, count(&total)?))
    }

    async fn update(&self, item: Item) -> Result<Item, DomainError> {
        let query = r#"
            UPDATE items
            SET title = ?, description = ?, category = ?, daily_rate = ?,
                location = ?, is_available = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.category)
            .bind(item.daily_rate)
            .bind(&item.location)
            .bind(item.is_available)
            .bind(item.updated_at)
            .bind(item.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update item"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Item"));
        }
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        // Rentals and their payments are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete item"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM items WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count items"))?;

        count(&row)
    }
}
