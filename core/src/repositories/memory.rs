//! In-memory repository implementations
//!
//! All three repositories share one set of tables behind a single lock, so
//! joins and uniqueness checks see a consistent snapshot. Used by the tests
//! and by `STORAGE_BACKEND=memory` runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rh_shared::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::item::{Item, ItemFilter};
use crate::domain::entities::payment::{Payment, PaymentStatus, PaymentWithRental};
use crate::domain::entities::rental::{Rental, RentalStatus, RentalWithItem};
use crate::domain::entities::round_to_cents;
use crate::errors::DomainError;

use super::{ItemRepository, PaymentRepository, RentalRepository};

#[derive(Debug, Default)]
struct Tables {
    items: HashMap<Uuid, Item>,
    rentals: HashMap<Uuid, Rental>,
    payments: HashMap<Uuid, Payment>,
}

impl Tables {
    fn rental_with_item(&self, rental: &Rental) -> Option<RentalWithItem> {
        self.items.get(&rental.item_id).map(|item| RentalWithItem {
            rental: rental.clone(),
            item: item.summary(),
        })
    }

    fn payment_with_rental(&self, payment: &Payment) -> Option<PaymentWithRental> {
        self.rentals
            .get(&payment.rental_id)
            .map(|rental| PaymentWithRental {
                payment: payment.clone(),
                rental: rental.summary(),
            })
    }

    fn owned_by(&self, rental: &Rental, owner_id: Uuid) -> bool {
        self.items
            .get(&rental.item_id)
            .is_some_and(|item| item.owner_id == owner_id)
    }
}

/// Shared backing store for the in-memory repositories
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> InMemoryItemRepository {
        InMemoryItemRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn rentals(&self) -> InMemoryRentalRepository {
        InMemoryRentalRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn payments(&self) -> InMemoryPaymentRepository {
        InMemoryPaymentRepository {
            tables: Arc::clone(&self.tables),
        }
    }
}

/// Sorts newest first, then cuts one page
fn paginate<T>(
    mut rows: Vec<T>,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
    pagination: Pagination,
) -> (Vec<T>, u64) {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    let total = rows.len() as u64;
    let page = rows
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();
    (page, total)
}

/// In-memory item repository
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let mut tables = self.tables.write().await;
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let tables = self.tables.read().await;
        let matches = tables
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        Ok(paginate(matches, |item: &Item| item.created_at, pagination))
    }

    async fn update(&self, item: Item) -> Result<Item, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(&item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(item)
            }
            None => Err(DomainError::not_found("Item")),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.items.remove(&id).is_none() {
            return Ok(false);
        }
        // Rental history and its payments go with the item
        let rental_ids: Vec<Uuid> = tables
            .rentals
            .values()
            .filter(|r| r.item_id == id)
            .map(|r| r.id)
            .collect();
        tables.rentals.retain(|_, r| r.item_id != id);
        tables
            .payments
            .retain(|_, p| !rental_ids.contains(&p.rental_id));
        Ok(true)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.items.values().filter(|i| i.owner_id == owner_id).count() as u64)
    }
}

/// In-memory rental repository
#[derive(Debug, Clone)]
pub struct InMemoryRentalRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn create(&self, rental: Rental) -> Result<Rental, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&rental.item_id) {
            return Err(DomainError::not_found("Item"));
        }
        tables.rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        Ok(self.tables.read().await.rentals.get(&id).cloned())
    }

    async fn find_with_item(&self, id: Uuid) -> Result<Option<RentalWithItem>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .get(&id)
            .and_then(|rental| tables.rental_with_item(rental)))
    }

    async fn list_by_renter(
        &self,
        renter_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError> {
        let tables = self.tables.read().await;
        let rows = tables
            .rentals
            .values()
            .filter(|r| r.renter_id == renter_id)
            .filter_map(|r| tables.rental_with_item(r))
            .collect();
        Ok(paginate(rows, |r: &RentalWithItem| r.rental.created_at, pagination))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<RentalWithItem>, u64), DomainError> {
        let tables = self.tables.read().await;
        let rows = tables
            .rentals
            .values()
            .filter(|r| tables.owned_by(r, owner_id))
            .filter_map(|r| tables.rental_with_item(r))
            .collect();
        Ok(paginate(rows, |r: &RentalWithItem| r.rental.created_at, pagination))
    }

    async fn has_open_overlap(
        &self,
        item_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.rentals.values().any(|r| {
            r.item_id == item_id && r.status.is_open() && r.overlaps(start, end)
        }))
    }

    async fn has_open_rentals(&self, item_id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .values()
            .any(|r| r.item_id == item_id && r.status.is_open()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RentalStatus,
    ) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.rentals.get_mut(&id) {
            Some(rental) => {
                rental.status = status;
                rental.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let removed = tables.rentals.remove(&id).is_some();
        if removed {
            tables.payments.retain(|_, p| p.rental_id != id);
        }
        Ok(removed)
    }

    async fn count_by_renter(
        &self,
        renter_id: Uuid,
        status: Option<RentalStatus>,
    ) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .values()
            .filter(|r| r.renter_id == renter_id && status.map_or(true, |s| r.status == s))
            .count() as u64)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .rentals
            .values()
            .filter(|r| tables.owned_by(r, owner_id))
            .count() as u64)
    }
}

/// In-memory payment repository
#[derive(Debug, Clone)]
pub struct InMemoryPaymentRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.rentals.contains_key(&payment.rental_id) {
            return Err(DomainError::not_found("Rental"));
        }
        if tables
            .payments
            .values()
            .any(|p| p.rental_id == payment.rental_id)
        {
            return Err(DomainError::conflict(
                "Payment already exists for this rental",
            ));
        }
        tables.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        Ok(self.tables.read().await.payments.get(&id).cloned())
    }

    async fn find_with_rental(&self, id: Uuid) -> Result<Option<PaymentWithRental>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .get(&id)
            .and_then(|p| tables.payment_with_rental(p)))
    }

    async fn find_by_rental(
        &self,
        rental_id: Uuid,
    ) -> Result<Option<PaymentWithRental>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .values()
            .find(|p| p.rental_id == rental_id)
            .and_then(|p| tables.payment_with_rental(p)))
    }

    async fn exists_for_rental(&self, rental_id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.payments.values().any(|p| p.rental_id == rental_id))
    }

    async fn list(
        &self,
        status: Option<PaymentStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<PaymentWithRental>, u64), DomainError> {
        let tables = self.tables.read().await;
        let rows = tables
            .payments
            .values()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .filter_map(|p| tables.payment_with_rental(p))
            .collect();
        Ok(paginate(rows, |p: &PaymentWithRental| p.payment.created_at, pagination))
    }

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.payments.get_mut(&payment.id) {
            Some(existing) => {
                *existing = payment.clone();
                Ok(payment)
            }
            None => Err(DomainError::not_found("Payment")),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.tables.write().await.payments.remove(&id).is_some())
    }

    async fn delete_by_rental(&self, rental_id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.payments.len();
        tables.payments.retain(|_, p| p.rental_id != rental_id);
        Ok(tables.payments.len() < before)
    }

    async fn total_completed_for_renter(&self, renter_id: Uuid) -> Result<f64, DomainError> {
        let tables = self.tables.read().await;
        let total: f64 = tables
            .payments
            .values()
            .filter(|p| p.status == PaymentStatus::Completed)
            .filter(|p| {
                tables
                    .rentals
                    .get(&p.rental_id)
                    .is_some_and(|r| r.renter_id == renter_id)
            })
            .map(|p| p.amount)
            .sum();
        Ok(round_to_cents(total))
    }
}
