//! # RentHub Core
//!
//! Core business logic and domain layer for the RentHub backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Item, ItemChanges, ItemFilter, ItemSummary, NewItem, NewPayment, NewRental, Payment,
    PaymentChanges, PaymentStatus, PaymentWithRental, Rental, RentalStatus, RentalSummary,
    RentalWithItem,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    InMemoryItemRepository, InMemoryPaymentRepository, InMemoryRentalRepository, InMemoryStore,
    ItemRepository, PaymentRepository, RentalRepository,
};
pub use services::{
    AccountService, AccountSummary, ItemService, PaymentService, RentalRole, RentalService,
};
