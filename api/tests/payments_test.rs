//! Integration tests for the payment endpoints

mod common;

use actix_web::test;
use serde_json::{json, Value};
use uuid::Uuid;

use rh_api::create_app;

#[actix_web::test]
async fn test_payments_require_auth() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;

    let req = test::TestRequest::get().uri("/api/v1/payments").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_create_payment_with_rental_projection() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let renter = Uuid::new_v4();
    let item = common::seed_item(&state, Uuid::new_v4()).await;
    let booked = common::seed_rental(&state, &item, renter, 1, 3).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/payments")
        .insert_header(common::bearer(renter))
        .set_json(json!({
            "rental_id": booked.rental.id,
            "amount": 70.0,
            "method": "  card "
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["method"], "card");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["rental"]["id"], booked.rental.id.to_string());
    assert_eq!(body["data"]["rental"]["total_price"], 70.0);

    let req = test::TestRequest::post()
        .uri("/api/v1/payments")
        .insert_header(common::bearer(renter))
        .set_json(json!({
            "rental_id": booked.rental.id,
            "amount": 70.0,
            "method": "cash"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Payment already exists for this rental");
}

#[actix_web::test]
async fn test_create_payment_validation() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let renter = Uuid::new_v4();
    let item = common::seed_item(&state, Uuid::new_v4()).await;
    let booked = common::seed_rental(&state, &item, renter, 1, 3).await;

    let cases = [
        (
            json!({"rental_id": Uuid::new_v4(), "amount": 10.0, "method": "card"}),
            404,
            "Rental not found",
        ),
        (
            json!({"rental_id": booked.rental.id, "amount": 0, "method": "card"}),
            400,
            "Amount must be greater than 0",
        ),
        (
            json!({"rental_id": booked.rental.id, "amount": 10.0, "method": "   "}),
            400,
            "Payment method is required",
        ),
    ];

    for (payload, status, error) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/payments")
            .insert_header(common::bearer(renter))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], error);
    }
}

#[actix_web::test]
async fn test_payment_lifecycle() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let renter = Uuid::new_v4();
    let item = common::seed_item(&state, Uuid::new_v4()).await;
    let booked = common::seed_rental(&state, &item, renter, 1, 3).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/{}/payment", booked.rental.id))
        .insert_header(common::bearer(renter))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Payment not found");

    let req = test::TestRequest::post()
        .uri("/api/v1/payments")
        .insert_header(common::bearer(renter))
        .set_json(json!({"rental_id": booked.rental.id, "amount": 70.0, "method": "card"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(body["data"]["paid_at"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/{}/payment", booked.rental.id))
        .insert_header(common::bearer(renter))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/payments/{}", id))
        .insert_header(common::bearer(renter))
        .set_json(json!({"status": "completed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "completed");
    assert!(body["data"]["paid_at"].is_string());

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/payments/{}", id))
        .insert_header(common::bearer(renter))
        .set_json(json!({"status": "failed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let req = test::TestRequest::get()
        .uri("/api/v1/payments?status=completed")
        .insert_header(common::bearer(renter))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/payments?status=refunded")
        .insert_header(common::bearer(renter))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/payments/{}", id))
        .insert_header(common::bearer(renter))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/payments/{}", id))
        .insert_header(common::bearer(renter))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
