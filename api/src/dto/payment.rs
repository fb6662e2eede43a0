use rh_core::domain::entities::payment::{NewPayment, PaymentChanges, PaymentStatus};
use rh_core::errors::DomainResult;
use rh_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /payments`
///
/// Field rules (positive amount, non-blank method) are enforced by the
/// payment service after the rental checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub rental_id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub method: String,
    /// Defaults to "pending"
    pub status: Option<String>,
}

impl CreatePaymentRequest {
    pub fn into_new_payment(self) -> DomainResult<NewPayment> {
        let status = self
            .status
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or(PaymentStatus::Pending);
        Ok(NewPayment {
            rental_id: self.rental_id,
            amount: self.amount,
            method: self.method,
            status,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub status: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn into_changes(self) -> DomainResult<PaymentChanges> {
        Ok(PaymentChanges {
            amount: self.amount,
            method: self.method,
            status: self.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PaymentListQuery {
    pub fn status(&self) -> DomainResult<Option<PaymentStatus>> {
        self.status.as_deref().map(str::parse).transpose()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}
