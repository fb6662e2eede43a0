//! Payment entity: the single payment settling a rental.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::positive_cents;
use super::rental::RentalSummary;

/// Maximum length of a payment method, in characters
pub const MAX_METHOD_LENGTH: usize = 64;

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Completed)
                | (PaymentStatus::Pending, PaymentStatus::Failed)
                | (PaymentStatus::Failed, PaymentStatus::Pending)
                | (PaymentStatus::Completed, PaymentStatus::Refunded)
        )
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(DomainError::validation(format!(
                "Invalid payment status: {}",
                other
            ))),
        }
    }
}

/// A payment for a rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    /// Rental settled by this payment; unique across payments
    pub rental_id: Uuid,
    pub amount: f64,
    /// Free-form payment method label, e.g. "card" or "paypal"
    pub method: String,
    pub status: PaymentStatus,
    /// Set when the payment enters `completed`
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment from validated input
    pub fn new(input: NewPayment) -> Self {
        let now = Utc::now();
        let paid_at = (input.status == PaymentStatus::Completed).then_some(now);
        Self {
            id: Uuid::new_v4(),
            rental_id: input.rental_id,
            amount: input.amount,
            method: input.method,
            status: input.status,
            paid_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated changes, enforcing status transitions
    pub fn apply(&mut self, changes: PaymentChanges) -> DomainResult<()> {
        if let Some(next) = changes.status {
            if next != self.status {
                if !self.status.can_transition_to(next) {
                    return Err(DomainError::InvalidTransition {
                        from: self.status.to_string(),
                        to: next.to_string(),
                    });
                }
                if next == PaymentStatus::Completed {
                    self.paid_at = Some(Utc::now());
                }
                self.status = next;
            }
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(method) = changes.method {
            self.method = method;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Input for recording a payment
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub rental_id: Uuid,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// Checks amount and method; the method is stored trimmed
    pub fn normalized(self) -> DomainResult<Self> {
        Ok(Self {
            rental_id: self.rental_id,
            amount: validate_amount(self.amount)?,
            method: normalize_method(&self.method)?,
            status: self.status,
        })
    }
}

/// Partial update for a payment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentChanges {
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl PaymentChanges {
    /// Applies the creation rules to every provided field
    pub fn normalized(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        Ok(Self {
            amount: self.amount.map(validate_amount).transpose()?,
            method: self.method.as_deref().map(normalize_method).transpose()?,
            status: self.status,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.method.is_none() && self.status.is_none()
    }
}

/// A payment joined with its rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentWithRental {
    #[serde(flatten)]
    pub payment: Payment,
    pub rental: RentalSummary,
}

fn validate_amount(amount: f64) -> DomainResult<f64> {
    positive_cents(amount).ok_or_else(|| DomainError::validation("Amount must be greater than 0"))
}

fn normalize_method(method: &str) -> DomainResult<String> {
    let method = method.trim();
    if method.is_empty() {
        return Err(DomainError::validation("Payment method is required"));
    }
    if method.chars().count() > MAX_METHOD_LENGTH {
        return Err(DomainError::validation(format!(
            "Payment method must be at most {} characters",
            MAX_METHOD_LENGTH
        )));
    }
    Ok(method.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: f64, method: &str) -> NewPayment {
        NewPayment {
            rental_id: Uuid::new_v4(),
            amount,
            method: method.to_string(),
            status: PaymentStatus::Pending,
        }
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(input(0.0, "card").normalized().is_err());
        assert!(input(-1.0, "card").normalized().is_err());
        assert!(input(f64::NAN, "card").normalized().is_err());
        assert_eq!(input(0.01, "card").normalized().unwrap().amount, 0.01);
    }

    #[test]
    fn test_amount_rounding_to_zero_is_rejected() {
        for amount in [0.004, 0.001, 1e307] {
            let err = input(amount, "card").normalized().unwrap_err();
            assert_eq!(err.to_string(), "Amount must be greater than 0");
        }
        assert_eq!(input(0.006, "card").normalized().unwrap().amount, 0.01);

        let changes = PaymentChanges {
            amount: Some(0.004),
            ..Default::default()
        };
        assert!(changes.normalized().is_err());
    }

    #[test]
    fn test_method_length_is_limited() {
        let padded = format!("  {}  ", "a".repeat(MAX_METHOD_LENGTH));
        assert_eq!(
            input(10.0, &padded).normalized().unwrap().method.len(),
            MAX_METHOD_LENGTH
        );

        let err = input(10.0, &"a".repeat(MAX_METHOD_LENGTH + 1))
            .normalized()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_method_is_trimmed_and_required() {
        assert_eq!(input(10.0, "  card ").normalized().unwrap().method, "card");
        let err = input(10.0, " \t ").normalized().unwrap_err();
        assert_eq!(err.to_string(), "Payment method is required");
    }

    #[test]
    fn test_completed_payment_is_stamped() {
        let mut new = input(10.0, "card");
        new.status = PaymentStatus::Completed;
        let payment = Payment::new(new);
        assert!(payment.paid_at.is_some());

        let pending = Payment::new(input(10.0, "card"));
        assert!(pending.paid_at.is_none());
    }

    #[test]
    fn test_apply_status_transitions() {
        let mut payment = Payment::new(input(10.0, "card"));

        payment
            .apply(PaymentChanges {
                status: Some(PaymentStatus::Completed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.paid_at.is_some());

        let err = payment
            .apply(PaymentChanges {
                status: Some(PaymentStatus::Failed),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_same_status_is_a_no_op() {
        let mut payment = Payment::new(input(10.0, "card"));
        payment
            .apply(PaymentChanges {
                status: Some(PaymentStatus::Pending),
                amount: Some(12.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount, 12.0);
    }

    #[test]
    fn test_changes_validation() {
        assert!(PaymentChanges::default().normalized().is_err());
        assert!(PaymentChanges {
            method: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized()
        .is_err());
        assert!(PaymentChanges {
            amount: Some(0.0),
            ..Default::default()
        }
        .normalized()
        .is_err());
    }
}
