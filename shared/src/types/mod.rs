//! Type definitions shared by the API and the services
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - The JSON response envelope

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::ApiResponse;
