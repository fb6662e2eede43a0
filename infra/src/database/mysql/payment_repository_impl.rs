//! MySQL implementation of the PaymentRepository trait.
//!
//! The `uq_payments_rental` unique key backs the one-payment-per-rental rule;
//! a duplicate insert surfaces as `Conflict` even when two requests race past
//! the service's pre-check.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rh_core::domain::entities::payment::{Payment, PaymentStatus, PaymentWithRental};
use rh_core::domain::entities::rental::RentalSummary;
use rh_core::errors::DomainError;
use rh_core::repositories::PaymentRepository;
use rh_shared::Pagination;

use super::{
    column, count, db_error, is_foreign_key_violation, is_unique_violation, status_column,
    uuid_column,
};

const PAYMENT_COLUMNS: &str =
    "id, rental_id, amount, method, status, paid_at, created_at, updated_at";

const PAYMENT_WITH_RENTAL: &str = r#"
    SELECT p.id, p.rental_id, p.amount, p.method, p.status, p.paid_at,
           p.created_at, p.updated_at,
           r.item_id AS rental_item_id, r.renter_id AS rental_renter_id,
           r.start_date AS rental_start_date, r.end_date AS rental_end_date,
           r.total_price AS rental_total_price, r.status AS rental_status
    FROM payments p
    JOIN rentals r ON r.id = p.rental_id
"#;

/// MySQL implementation of PaymentRepository
pub struct MySqlPaymentRepository {
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: &MySqlRow) -> Result<Payment, DomainError> {
        Ok(Payment {
            id: uuid_column(row, "id")?,
            rental_id: uuid_column(row, "rental_id")?,
            amount: column(row, "amount")?,
            method: column(row, "method")?,
            status: status_column(row, "status")?,
            paid_at: column(row, "paid_at")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn row_to_payment_with_rental(row: &MySqlRow) -> Result<PaymentWithRental, DomainError> {
        let payment = Self::row_to_payment(row)?;
        let rental = RentalSummary {
            id: payment.rental_id,
            item_id: uuid_column(row, "rental_item_id")?,
            renter_id: uuid_column(row, "rental_renter_id")?,
            start_date: column(row, "rental_start_date")?,
            end_date: column(row, "rental_end_date")?,
            total_price: column(row, "rental_total_price")?,
            status: status_column(row, "rental_status")?,
        };
        Ok(PaymentWithRental { payment, rental })
    }

    async fn fetch_with_rental(
        &self,
        condition: &str,
        id: Uuid,
    ) -> Result<Option<PaymentWithRental>, DomainError> {
        let query = format!("{} WHERE {} LIMIT 1", PAYMENT_WITH_RENTAL, condition);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find payment"))?;

        row.as_ref().map(Self::row_to_payment_with_rental).transpose()
    }
}

fn push_status(builder: &mut QueryBuilder<'_, MySql>, status: Option<PaymentStatus>) {
    if let Some(status) = status {
        builder.push(" WHERE p.status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        let query = r#"
            INSERT INTO payments (
                id, rental_id, amount, method, status, paid_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(payment.id.to_string())
            .bind(payment.rental_id.to_string())
            .bind(payment.amount)
            .bind(&payment.method)
            .bind(payment.status.as_str())
            .bind(payment.paid_at)
            .bind(payment.created_at)
            .bind(payment.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::conflict("Payment already exists for this rental")
                } else if is_foreign_key_violation(&e) {
                    DomainError::not_found("Rental")
                } else {
                    db_error("Failed to create payment")(e)
                }
            })?;

        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let query = format!("SELECT {} FROM payments WHERE id = ? LIMIT 1", PAYMENT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find payment"))?;

        row.as_ref().map(Self::row_to_payment).transpose()
    }

    async fn find_with_rental(&self, id: Uuid) -> Result<Option<PaymentWithRental>, DomainError> {
        self.fetch_with_rental("p.id = ?", id).await
    }

    async fn find_by_rental(
        &self,
        rental_id: Uuid,
    ) -> Result<Option<PaymentWithRental>, DomainError> {
        self.fetch_with_rental("p.rental_id = ?", rental_id).await
    }

    async fn exists_for_rental(&self, rental_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM payments WHERE rental_id = ?")
            .bind(rental_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check payment existence"))?;

        Ok(count(&row)? > 0)
    }

    async fn list(
        &self,
        status: Option<PaymentStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<PaymentWithRental>, u64), DomainError> {
        let mut counter = QueryBuilder::<MySql>::new("SELECT COUNT(*) AS total FROM payments p");
        push_status(&mut counter, status);
        let total = counter
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count payments"))?;

        let mut query = QueryBuilder::<MySql>::new(PAYMENT_WITH_RENTAL);
        push_status(&mut query, status);
        query
            .push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list payments"))?;

        let payments = rows
            .iter()
            .map(Self::row_to_payment_with_rental)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((payments, count(&total)?))
    }

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError> {
        let query = r#"
            UPDATE payments
            SET amount = ?, method = ?, status = ?, paid_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(payment.amount)
            .bind(&payment.method)
            .bind(payment.status.as_str())
            .bind(payment.paid_at)
            .bind(payment.updated_at)
            .bind(payment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update payment"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Payment"));
        }
        Ok(payment)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete payment"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_rental(&self, rental_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM payments WHERE rental_id = ?")
            .bind(rental_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete payment"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn total_completed_for_renter(&self, renter_id: Uuid) -> Result<f64, DomainError> {
        let query = r#"
            SELECT SUM(p.amount) AS total
            FROM payments p
            JOIN rentals r ON r.id = p.rental_id
            WHERE r.renter_id = ? AND p.status = 'completed'
        "#;

        let row = sqlx::query(query)
            .bind(renter_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to sum payments"))?;

        let total: Option<f64> = column(&row, "total")?;
        Ok(total.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_is_optional() {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) AS total FROM payments p");
        push_status(&mut builder, None);
        assert_eq!(builder.sql(), "SELECT COUNT(*) AS total FROM payments p");

        push_status(&mut builder, Some(PaymentStatus::Completed));
        assert!(builder.sql().ends_with(" WHERE p.status = ?"));
    }
}
