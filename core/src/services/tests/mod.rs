//! Tests for the business services, run against the in-memory repositories

mod item_service_tests;
