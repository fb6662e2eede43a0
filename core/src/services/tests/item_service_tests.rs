//! Unit tests for the item service

use rh_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::item::{ItemChanges, ItemFilter};
use crate::domain::entities::rental::RentalStatus;
use crate::errors::DomainError;

use super::fixtures::*;

#[tokio::test]
async fn test_create_and_get_item() {
    let services = services();
    let owner = Uuid::new_v4();

    let item = services
        .items
        .create_item(owner, new_item("  Ladder  ", 8.0))
        .await
        .unwrap();
    assert_eq!(item.title, "Ladder");
    assert_eq!(item.category, "tools");
    assert_eq!(item.owner_id, owner);

    let fetched = services.items.get_item(item.id).await.unwrap();
    assert_eq!(fetched, item);
}

#[tokio::test]
async fn test_create_item_validation() {
    let services = services();
    let err = services
        .items
        .create_item(Uuid::new_v4(), new_item("Ladder", 0.0))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Daily rate must be greater than 0");
}

#[tokio::test]
async fn test_rate_rounding_to_zero_is_rejected() {
    let services = services();
    let owner = Uuid::new_v4();

    let err = services
        .items
        .create_item(owner, new_item("Pebble", 0.001))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Daily rate must be greater than 0");

    let listed = services
        .items
        .list_items(
            ItemFilter {
                owner_id: Some(owner),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(listed.total, 0);
}

#[tokio::test]
async fn test_get_missing_item() {
    let services = services();
    let err = services.items.get_item(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, DomainError::not_found("Item"));
}

#[tokio::test]
async fn test_list_items_with_filters() {
    let services = services();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    listed_item(&services, alice).await;
    let mut tent = new_item("Tent", 15.0);
    tent.category = "Camping".to_string();
    let tent = services.items.create_item(bob, tent).await.unwrap();

    let camping = services
        .items
        .list_items(
            ItemFilter {
                category: Some("camping".to_string()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(camping.total, 1);
    assert_eq!(camping.items[0].id, tent.id);

    let by_alice = services
        .items
        .list_items(
            ItemFilter {
                owner_id: Some(alice),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_alice.total, 1);
    assert_eq!(by_alice.items[0].owner_id, alice);
}

#[tokio::test]
async fn test_only_owner_updates_item() {
    let services = services();
    let owner = Uuid::new_v4();
    let item = listed_item(&services, owner).await;

    let changes = ItemChanges {
        daily_rate: Some(25.0),
        ..Default::default()
    };
    let err = services
        .items
        .update_item(Uuid::new_v4(), item.id, changes.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let updated = services
        .items
        .update_item(owner, item.id, changes)
        .await
        .unwrap();
    assert_eq!(updated.daily_rate, 25.0);
    assert!(updated.updated_at >= item.updated_at);
}

#[tokio::test]
async fn test_delete_item_blocked_by_open_rental() {
    let services = services();
    let owner = Uuid::new_v4();
    let renter = Uuid::new_v4();
    let item = listed_item(&services, owner).await;
    let booking = booked(&services, &item, renter, 1, 3).await;

    let err = services.items.delete_item(owner, item.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    services
        .rentals
        .update_status(renter, booking.rental.id, RentalStatus::Cancelled)
        .await
        .unwrap();
    services.items.delete_item(owner, item.id).await.unwrap();
    assert!(services.items.get_item(item.id).await.is_err());
}

#[tokio::test]
async fn test_delete_item_requires_owner() {
    let services = services();
    let item = listed_item(&services, Uuid::new_v4()).await;
    let err = services
        .items
        .delete_item(Uuid::new_v4(), item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));
}
