//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 20;
const MIN_PER_PAGE: u32 = 1;
const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }.validate()
    }

    /// Build from optional query values
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)).saturating_mul(self.per_page)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Clamp page to at least 1 and per_page into the allowed window
    pub fn validate(mut self) -> Self {
        self.page = self.page.max(1);
        self.per_page = self.per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE);
        self
    }
}

/// One page of results with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The items on this page
    pub items: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether there's a next page
    pub has_next: bool,

    /// Whether there's a previous page
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = Self::calculate_total_pages(total, pagination.per_page);
        Self {
            items,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }

    fn calculate_total_pages(total: u64, per_page: u32) -> u32 {
        if total == 0 || per_page == 0 {
            return 0;
        }
        total.div_ceil(per_page as u64) as u32
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}
