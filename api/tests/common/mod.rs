//! Shared helpers for API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header::AUTHORIZATION, web};
use chrono::NaiveDate;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use rh_api::middleware::Claims;
use rh_api::AppState;
use rh_core::domain::entities::item::{Item, NewItem};
use rh_core::domain::entities::rental::{NewRental, RentalWithItem};
use rh_core::repositories::{
    InMemoryItemRepository, InMemoryPaymentRepository, InMemoryRentalRepository, InMemoryStore,
};
use rh_shared::{AppConfig, AuthConfig};

pub const SECRET: &str = "integration-test-secret";

pub type TestState =
    AppState<InMemoryItemRepository, InMemoryRentalRepository, InMemoryPaymentRepository>;

pub fn config() -> AppConfig {
    AppConfig {
        auth: AuthConfig::new(SECRET),
        ..AppConfig::default()
    }
}

pub fn state() -> web::Data<TestState> {
    let store = InMemoryStore::new();
    web::Data::new(AppState::new(
        Arc::new(store.items()),
        Arc::new(store.rentals()),
        Arc::new(store.payments()),
    ))
}

pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        iat: None,
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(user_id: Uuid) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token_for(user_id)))
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, d).unwrap()
}

pub async fn seed_item(state: &TestState, owner_id: Uuid) -> Item {
    state
        .item_service
        .create_item(
            owner_id,
            NewItem {
                title: "Camera".to_string(),
                description: "Mirrorless body".to_string(),
                category: "electronics".to_string(),
                daily_rate: 35.0,
                location: Some("Porto".to_string()),
            },
        )
        .await
        .unwrap()
}

pub async fn seed_rental(
    state: &TestState,
    item: &Item,
    renter_id: Uuid,
    start: u32,
    end: u32,
) -> RentalWithItem {
    state
        .rental_service
        .create_rental(
            renter_id,
            NewRental {
                item_id: item.id,
                start_date: day(start),
                end_date: day(end),
            },
        )
        .await
        .unwrap()
}
