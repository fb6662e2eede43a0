//! Domain entities representing core business objects.

pub mod item;
pub mod payment;
pub mod rental;

pub use item::{
    Item, ItemChanges, ItemFilter, ItemSummary, NewItem, MAX_CATEGORY_LENGTH, MAX_LOCATION_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use payment::{
    NewPayment, Payment, PaymentChanges, PaymentStatus, PaymentWithRental, MAX_METHOD_LENGTH,
};
pub use rental::{NewRental, Rental, RentalStatus, RentalSummary, RentalWithItem};

/// Round a currency amount to whole cents
pub(crate) fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Rounds to cents, keeping the result only if it is finite and above zero
pub(crate) fn positive_cents(amount: f64) -> Option<f64> {
    Some(round_to_cents(amount)).filter(|cents| cents.is_finite() && *cents > 0.0)
}
