//! Route handlers
//!
//! Handlers parse path, query and body input, call one service method and
//! wrap the result in the `ApiResponse` envelope.

pub mod account;
pub mod items;
pub mod payments;
pub mod rentals;

use std::sync::Arc;

use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_core::services::{AccountService, ItemService, PaymentService, RentalService};

/// Application state shared by all handlers
pub struct AppState<I, R, P>
where
    I: ItemRepository,
    R: RentalRepository,
    P: PaymentRepository,
{
    pub item_service: ItemService<I, R>,
    pub rental_service: RentalService<I, R, P>,
    pub payment_service: PaymentService<R, P>,
    pub account_service: AccountService<I, R, P>,
}

impl<I, R, P> AppState<I, R, P>
where
    I: ItemRepository,
    R: RentalRepository,
    P: PaymentRepository,
{
    /// Wires every service to the same set of repositories
    pub fn new(items: Arc<I>, rentals: Arc<R>, payments: Arc<P>) -> Self {
        Self {
            item_service: ItemService::new(Arc::clone(&items), Arc::clone(&rentals)),
            rental_service: RentalService::new(
                Arc::clone(&items),
                Arc::clone(&rentals),
                Arc::clone(&payments),
            ),
            payment_service: PaymentService::new(Arc::clone(&rentals), Arc::clone(&payments)),
            account_service: AccountService::new(items, rentals, payments),
        }
    }
}
