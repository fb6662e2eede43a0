//! # RentHub API
//!
//! HTTP layer of the RentHub backend: the actix-web application factory,
//! route handlers, request DTOs and the auth/CORS middleware.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
