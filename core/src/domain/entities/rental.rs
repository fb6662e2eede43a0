//! Rental entity: a renter booking an item for a range of days.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::item::{Item, ItemSummary};
use super::round_to_cents;

/// Lifecycle of a rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    /// Requested, not yet handed over
    Pending,
    /// Item is with the renter
    Active,
    /// Item returned
    Completed,
    /// Called off before completion
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Active => "active",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: RentalStatus) -> bool {
        matches!(
            (self, next),
            (RentalStatus::Pending, RentalStatus::Active)
                | (RentalStatus::Pending, RentalStatus::Cancelled)
                | (RentalStatus::Active, RentalStatus::Completed)
                | (RentalStatus::Active, RentalStatus::Cancelled)
        )
    }

    /// Pending and active rentals hold the item's calendar
    pub fn is_open(&self) -> bool {
        matches!(self, RentalStatus::Pending | RentalStatus::Active)
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RentalStatus::Pending),
            "active" => Ok(RentalStatus::Active),
            "completed" => Ok(RentalStatus::Completed),
            "cancelled" => Ok(RentalStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "Invalid rental status: {}",
                other
            ))),
        }
    }
}

/// A booking of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub item_id: Uuid,
    pub renter_id: Uuid,
    /// First rental day
    pub start_date: NaiveDate,
    /// Return day, exclusive
    pub end_date: NaiveDate,
    /// Days times the item's daily rate at booking time
    pub total_price: f64,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for booking an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub item_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewRental {
    /// Number of billed days; errors when the range is empty or inverted
    pub fn days(&self) -> DomainResult<i64> {
        let days = (self.end_date - self.start_date).num_days();
        if days < 1 {
            return Err(DomainError::validation(
                "End date must be after start date",
            ));
        }
        Ok(days)
    }
}

impl Rental {
    /// Creates a pending rental priced from the item's daily rate
    pub fn new(item: &Item, renter_id: Uuid, input: &NewRental) -> DomainResult<Self> {
        let days = input.days()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            item_id: item.id,
            renter_id,
            start_date: input.start_date,
            end_date: input.end_date,
            total_price: round_to_cents(days as f64 * item.daily_rate),
            status: RentalStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves to `next` if the lifecycle allows it
    pub fn transition_to(&mut self, next: RentalStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Half-open `[start, end)` overlap test
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && start < self.end_date
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Reduced view joined into payment responses
    pub fn summary(&self) -> RentalSummary {
        RentalSummary {
            id: self.id,
            item_id: self.item_id,
            renter_id: self.renter_id,
            start_date: self.start_date,
            end_date: self.end_date,
            total_price: self.total_price,
            status: self.status,
        }
    }
}

/// Rental projection carried by payment reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalSummary {
    pub id: Uuid,
    pub item_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: RentalStatus,
}

/// A rental joined with the item it books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalWithItem {
    #[serde(flatten)]
    pub rental: Rental,
    pub item: ItemSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::item::NewItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tent() -> Item {
        Item::new(
            Uuid::new_v4(),
            NewItem {
                title: "Tent".to_string(),
                description: String::new(),
                category: "camping".to_string(),
                daily_rate: 7.35,
                location: None,
            },
        )
    }

    #[test]
    fn test_new_rental_prices_by_day() {
        let item = tent();
        let input = NewRental {
            item_id: item.id,
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 4),
        };
        let rental = Rental::new(&item, Uuid::new_v4(), &input).unwrap();
        assert_eq!(rental.status, RentalStatus::Pending);
        assert_eq!(rental.days(), 3);
        assert_eq!(rental.total_price, 22.05);
    }

    #[test]
    fn test_new_rental_requires_forward_range() {
        let item = tent();
        let same_day = NewRental {
            item_id: item.id,
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 1),
        };
        assert!(matches!(
            Rental::new(&item, Uuid::new_v4(), &same_day),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_status_transitions() {
        use RentalStatus::*;
        assert!(Pending.can_transition_to(Active));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn test_transition_to_rejects_terminal_states() {
        let item = tent();
        let input = NewRental {
            item_id: item.id,
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 2),
        };
        let mut rental = Rental::new(&item, Uuid::new_v4(), &input).unwrap();
        rental.transition_to(RentalStatus::Cancelled).unwrap();
        let err = rental.transition_to(RentalStatus::Active).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "cancelled".to_string(),
                to: "active".to_string()
            }
        );
    }

    #[test]
    fn test_overlap_is_half_open() {
        let item = tent();
        let input = NewRental {
            item_id: item.id,
            start_date: date(2026, 7, 10),
            end_date: date(2026, 7, 15),
        };
        let rental = Rental::new(&item, Uuid::new_v4(), &input).unwrap();
        assert!(rental.overlaps(date(2026, 7, 14), date(2026, 7, 20)));
        assert!(rental.overlaps(date(2026, 7, 1), date(2026, 7, 11)));
        assert!(!rental.overlaps(date(2026, 7, 15), date(2026, 7, 18)));
        assert!(!rental.overlaps(date(2026, 7, 5), date(2026, 7, 10)));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(" Active ".parse::<RentalStatus>().unwrap(), RentalStatus::Active);
        assert!("returned".parse::<RentalStatus>().is_err());
    }
}
