//! MySQL implementation of the RentalRepository trait.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rh_core::domain::entities::item::ItemSummary;
use rh_core::domain::entities::rental::{Rental, RentalStatus, RentalWithItem};
use rh_core::errors::DomainError;
use rh_core::repositories::RentalRepository;
use rh_shared::Pagination;

use super::{column, count, db_error, is_foreign_key_violation, status_column, uuid_column};

const RENTAL_WITH_ITEM: &str = r#"
    SELECT r.id, r.item_id, r.renter_id, r.start_date, r.end_date, r.total_price,
           r.status, r.created_at, r.updated_at,
           i.owner_id AS item_owner_id, i.title AS item_title,
           i.daily_rate AS item_daily_rate
    FROM rentals r
    JOIN items i ON i.id = r.item_id
"#;

/// MySQL implementation of RentalRepository
pub struct MySqlRentalRepository {
    pool: MySqlPool,
}

impl MySqlRentalRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_rental(row: &MySqlRow) -> Result<Rental, DomainError> {
        Ok(Rental {
            id: uuid_column(row, "id")?,
            item_id: uuid_column(row, "item_id")?,
            renter_id: uuid_column(row, "renter_id")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            total_price: column(row, "total_price")?,
            status: status_column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn row_to_rental_with_item(row: &MySqlRow) -> Result<RentalWithItem, DomainError> {
        let rental = Self::row_to_rental(row)?;
        let item = ItemSummary {
            id: rental.item_id,
            owner_id: uuid_column(row, "item_owner_id")?,
            title: column(row, "item_title")?,
            daily_rate: column(row, "item_daily_rate")?,
        };
        Ok(RentalWithItem { rental, item })
    }

    /// Runs a count query and a page query sharing one `WHERE` condition on
    /// a single user id column
    async fn list_where(
        &self,
        condition: &str,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError> {
        let count_query = format!(
            "SELECT COUNT(*) AS total FROM rentals r JOIN items i ON i.id = r.item_id WHERE {}",
            condition
        );
        let total = sqlx::query(&count_query)
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count rentals"))?;

        let query = format!(
            "{} WHERE {} ORDER BY r.created_at DESC LIMIT ? OFFSET ?",
            RENTAL_WITH_ITEM, condition
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list rentals"))?;

        let rentals = rows
            .iter()
            .map(Self::row_to_rental_with_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((rentals, count(&total)?))
    }
}

#[async_trait]
impl RentalRepository for MySqlRentalRepository {
    async fn create(&self, rental: Rental) -> Result<Rental, DomainError> {
        let query = r#"
            INSERT INTO rentals (
                id, item_id, renter_id, start_date, end_date, total_price,
                status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(rental.id.to_string())
            .bind(rental.item_id.to_string())
            .bind(rental.renter_id.to_string())
            .bind(rental.start_date)
            .bind(rental.end_date)
            .bind(rental.total_price)
            .bind(rental.status.as_str())
            .bind(rental.created_at)
            .bind(rental.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DomainError::not_found("Item")
                } else {
                    db_error("Failed to create rental")(e)
                }
            })?;

        Ok(rental)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        let query = r#"
            SELECT id, item_id, renter_id, start_date, end_date, total_price,
                   status, created_at, updated_at
            FROM rentals
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find rental"))?;

        row.as_ref().map(Self::row_to_rental).transpose()
    }

    async fn find_with_item(&self, id: Uuid) -> Result<Option<RentalWithItem>, DomainError> {
        let query = format!("{} WHERE r.id = ? LIMIT 1", RENTAL_WITH_ITEM);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find rental"))?;

        row.as_ref().map(Self::row_to_rental_with_item).transpose()
    }

    async fn list_by_renter(
        &self,
        renter_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError> {
        self.list_where("r.renter_id = ?", renter_id, pagination)
            .await
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError> {
        self.list_where("i.owner_id = ?", owner_id, pagination)
            .await
    }

    async fn has_open_overlap(
        &self,
        item_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, DomainError> {
        // Half-open ranges overlap when each starts before the other ends
        let query = r#"
            SELECT COUNT(*) AS total
            FROM rentals
            WHERE item_id = ?
                AND status IN ('pending', 'active')
                AND start_date < ?
                AND end_date > ?
        "#;

        let row = sqlx::query(query)
            .bind(item_id.to_string())
            .bind(end)
            .bind(start)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check rental overlap"))?;

        Ok(count(&row)? > 0)
    }

    async fn has_open_rentals(&self, item_id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS total
            FROM rentals
            WHERE item_id = ? AND status IN ('pending', 'active')
        "#;

        let row = sqlx::query(query)
            .bind(item_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check open rentals"))?;

        Ok(count(&row)? > 0)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RentalStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE rentals SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update rental status"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete rental"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_renter(
        &self,
        renter_id: Uuid,
        status: Option<RentalStatus>,
    ) -> Result<u64, DomainError> {
        let mut query =
            QueryBuilder::<MySql>::new("SELECT COUNT(*) AS total FROM rentals WHERE renter_id = ");
        query.push_bind(renter_id.to_string());
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        let row = query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count rentals"))?;

        count(&row)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS total
            FROM rentals r
            JOIN items i ON i.id = r.item_id
            WHERE i.owner_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(owner_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count rentals"))?;

        count(&row)
    }
}
