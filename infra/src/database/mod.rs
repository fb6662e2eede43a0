//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and migrations
//! - Repository implementations for items, rentals and payments

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlItemRepository, MySqlPaymentRepository, MySqlRentalRepository};
