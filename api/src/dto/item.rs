use rh_core::domain::entities::item::{ItemChanges, ItemFilter, NewItem};
use rh_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /items`
///
/// Length limits are checked by the domain on the trimmed values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub daily_rate: f64,

    pub location: Option<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(request: CreateItemRequest) -> Self {
        NewItem {
            title: request.title,
            description: request.description,
            category: request.category,
            daily_rate: request.daily_rate,
            location: request.location,
        }
    }
}

/// Partial update; omitted fields stay unchanged, an empty `location` clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    pub daily_rate: Option<f64>,

    pub location: Option<String>,

    pub is_available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemChanges {
    fn from(request: UpdateItemRequest) -> Self {
        ItemChanges {
            title: request.title,
            description: request.description,
            category: request.category,
            daily_rate: request.daily_rate,
            location: request.location,
            is_available: request.is_available,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    pub category: Option<String>,
    pub available: Option<bool>,
    pub owner_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ItemListQuery {
    pub fn filter(&self) -> ItemFilter {
        ItemFilter {
            category: self.category.clone(),
            available: self.available,
            owner_id: self.owner_id,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}
