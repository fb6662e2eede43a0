//! Repository interfaces for persistence, plus in-memory implementations.
//!
//! The traits are async-first and return `DomainError` so services never see
//! driver-specific errors.

pub mod item;
pub mod memory;
pub mod payment;
pub mod rental;

pub use item::ItemRepository;
pub use memory::{
    InMemoryItemRepository, InMemoryPaymentRepository, InMemoryRentalRepository, InMemoryStore,
};
pub use payment::PaymentRepository;
pub use rental::RentalRepository;
