//! Integration tests for the item endpoints

mod common;

use actix_web::{http::header::CONTENT_TYPE, test};
use serde_json::{json, Value};
use uuid::Uuid;

use rh_api::create_app;

#[actix_web::test]
async fn test_create_and_fetch_item() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;
    let owner = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(owner))
        .set_json(json!({
            "title": "  Road bike ",
            "description": "56cm frame",
            "category": "Sports",
            "daily_rate": 12.5,
            "location": "Lisbon"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Road bike");
    assert_eq!(body["data"]["category"], "sports");
    assert_eq!(body["data"]["owner_id"], owner.to_string());
    assert_eq!(body["data"]["is_available"], true);

    let id = body["data"]["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/items/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], id);
}

#[actix_web::test]
async fn test_create_item_requires_auth() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .set_json(json!({"title": "Tent", "category": "camping", "daily_rate": 9.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_create_item_validation() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;
    let owner = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(owner))
        .set_json(json!({"title": "", "category": "camping", "daily_rate": 9.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "title: Title is required");

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(owner))
        .set_json(json!({"title": "Tent", "category": "camping", "daily_rate": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Daily rate must be greater than 0");
}

#[actix_web::test]
async fn test_title_limit_ignores_surrounding_whitespace() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;
    let owner = Uuid::new_v4();
    let title = "t".repeat(120);

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(owner))
        .set_json(json!({"title": format!("  {}  ", title), "category": "misc", "daily_rate": 5.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], title);

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(owner))
        .set_json(json!({"title": "t".repeat(121), "category": "misc", "daily_rate": 5.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Title must be at most 120 characters");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .insert_header(common::bearer(Uuid::new_v4()))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[actix_web::test]
async fn test_get_item_errors() {
    let app = test::init_service(create_app(common::state(), &common::config())).await;

    let req = test::TestRequest::get().uri("/api/v1/items/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid item id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/items/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Item not found");
}

#[actix_web::test]
async fn test_list_items_with_filter_and_pagination() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let owner = Uuid::new_v4();
    for _ in 0..3 {
        common::seed_item(&state, owner).await;
    }
    common::seed_item(&state, Uuid::new_v4()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/items?owner_id={}&per_page=2", owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["has_next"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/items?category=Electronics&available=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 4);

    let req = test::TestRequest::get()
        .uri("/api/v1/items?available=maybe")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_only_owner_can_update() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let owner = Uuid::new_v4();
    let item = common::seed_item(&state, owner).await;
    let uri = format!("/api/v1/items/{}", item.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(Uuid::new_v4()))
        .set_json(json!({"daily_rate": 50.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(owner))
        .set_json(json!({"daily_rate": 50.0, "is_available": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["daily_rate"], 50.0);
    assert_eq!(body["data"]["is_available"], false);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(owner))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_delete_item_with_open_rental_conflicts() {
    let state = common::state();
    let app = test::init_service(create_app(state.clone(), &common::config())).await;
    let owner = Uuid::new_v4();
    let item = common::seed_item(&state, owner).await;
    common::seed_rental(&state, &item, Uuid::new_v4(), 1, 2).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/items/{}", item.id))
        .insert_header(common::bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let other = common::seed_item(&state, owner).await;
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/items/{}", other.id))
        .insert_header(common::bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Item deleted successfully");
}
