//! Item entity: something an owner lists for rent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::positive_cents;

/// Maximum length of an item title, in characters
pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_CATEGORY_LENGTH: usize = 64;
pub const MAX_LOCATION_LENGTH: usize = 255;

/// A listing in the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for the item
    pub id: Uuid,

    /// User who listed the item
    pub owner_id: Uuid,

    pub title: String,

    pub description: String,

    /// Lowercased category slug, e.g. "tools" or "camping"
    pub category: String,

    /// Price per rental day
    pub daily_rate: f64,

    pub location: Option<String>,

    /// Whether new rentals may be booked
    pub is_available: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new available item from already validated input
    pub fn new(owner_id: Uuid, input: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: input.title,
            description: input.description,
            category: input.category,
            daily_rate: input.daily_rate,
            location: input.location,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated changes and bumps `updated_at`
    pub fn apply(&mut self, changes: ItemChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(daily_rate) = changes.daily_rate {
            self.daily_rate = daily_rate;
        }
        if let Some(location) = changes.location {
            // An empty location clears it
            self.location = Some(location).filter(|l| !l.is_empty());
        }
        if let Some(is_available) = changes.is_available {
            self.is_available = is_available;
        }
        self.updated_at = Utc::now();
    }

    /// Checks whether the given user listed this item
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Reduced view joined into rental responses
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title.clone(),
            daily_rate: self.daily_rate,
        }
    }
}

/// Item projection carried by rental reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub daily_rate: f64,
}

/// Input for listing a new item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub daily_rate: f64,
    pub location: Option<String>,
}

impl NewItem {
    /// Validates the input and returns it in stored form
    pub fn normalized(self) -> DomainResult<Self> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: self.description.trim().to_string(),
            category: normalize_category(&self.category)?,
            daily_rate: validate_daily_rate(self.daily_rate)?,
            location: self
                .location
                .as_deref()
                .map(normalize_location)
                .transpose()?
                .filter(|l| !l.is_empty()),
        })
    }
}

/// Partial update for an item; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub daily_rate: Option<f64>,
    pub location: Option<String>,
    pub is_available: Option<bool>,
}

impl ItemChanges {
    /// Validates every provided field
    pub fn normalized(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        Ok(Self {
            title: self.title.as_deref().map(normalize_title).transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
            category: self.category.as_deref().map(normalize_category).transpose()?,
            daily_rate: self.daily_rate.map(validate_daily_rate).transpose()?,
            location: self.location.as_deref().map(normalize_location).transpose()?,
            is_available: self.is_available,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.daily_rate.is_none()
            && self.location.is_none()
            && self.is_available.is_none()
    }
}

/// Listing filters; all provided conditions must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub available: Option<bool>,
    pub owner_id: Option<Uuid>,
}

impl ItemFilter {
    /// Lowercases the category so it compares against stored slugs
    pub fn normalized(mut self) -> Self {
        self.category = self
            .category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.category.as_ref().map_or(true, |c| &item.category == c)
            && self.available.map_or(true, |a| item.is_available == a)
            && self.owner_id.map_or(true, |o| item.owner_id == o)
    }
}

fn normalize_title(title: &str) -> DomainResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(title.to_string())
}

fn normalize_category(category: &str) -> DomainResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(DomainError::validation("Category is required"));
    }
    if category.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(DomainError::validation(format!(
            "Category must be at most {} characters",
            MAX_CATEGORY_LENGTH
        )));
    }
    Ok(category.to_lowercase())
}

/// Trims the location; empty means none
fn normalize_location(location: &str) -> DomainResult<String> {
    let location = location.trim();
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Err(DomainError::validation(format!(
            "Location must be at most {} characters",
            MAX_LOCATION_LENGTH
        )));
    }
    Ok(location.to_string())
}

fn validate_daily_rate(rate: f64) -> DomainResult<f64> {
    positive_cents(rate).ok_or_else(|| DomainError::validation("Daily rate must be greater than 0"))
}
