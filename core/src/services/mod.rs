//! Business services containing domain logic and use cases.

pub mod account_service;
pub mod item_service;
pub mod payment_service;
pub mod rental_service;

#[cfg(test)]
mod tests;

pub use account_service::{AccountService, AccountSummary};
pub use item_service::ItemService;
pub use payment_service::PaymentService;
pub use rental_service::{RentalRole, RentalService};
