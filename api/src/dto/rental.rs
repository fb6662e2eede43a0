use chrono::NaiveDate;
use rh_core::domain::entities::rental::NewRental;
use rh_core::services::RentalRole;
use rh_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRentalRequest {
    pub item_id: Uuid,
    /// First rental day, `YYYY-MM-DD`
    pub start_date: NaiveDate,
    /// Return day (exclusive), `YYYY-MM-DD`
    pub end_date: NaiveDate,
}

impl From<CreateRentalRequest> for NewRental {
    fn from(request: CreateRentalRequest) -> Self {
        NewRental {
            item_id: request.item_id,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRentalStatusRequest {
    /// "active", "completed" or "cancelled"
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalListQuery {
    #[serde(default)]
    pub role: RentalRole,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl RentalListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}
