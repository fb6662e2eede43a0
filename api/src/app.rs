//! Application factory
//!
//! Builds the actix-web `App` with shared state, middleware and the route
//! table. Generic over the repository implementations so the same routes
//! serve MySQL and in-memory storage.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_shared::{ApiResponse, AppConfig};

use crate::handlers::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{account, items, payments, rentals, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<I, R, P>(
    app_state: web::Data<AppState<I, R, P>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let jwt = JwtAuth::new(&config.auth);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Last registered runs outermost
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .route("/", web::get().to(api_documentation))
                .service(
                    web::scope("/items")
                        .route("", web::get().to(items::list_items::<I, R, P>))
                        .route(
                            "",
                            web::post()
                                .to(items::create_item::<I, R, P>)
                                .wrap(jwt.clone()),
                        )
                        .route("/{id}", web::get().to(items::get_item::<I, R, P>))
                        .route(
                            "/{id}",
                            web::put()
                                .to(items::update_item::<I, R, P>)
                                .wrap(jwt.clone()),
                        )
                        .route(
                            "/{id}",
                            web::delete()
                                .to(items::delete_item::<I, R, P>)
                                .wrap(jwt.clone()),
                        ),
                )
                .service(
                    web::scope("/rentals")
                        .wrap(jwt.clone())
                        .route("", web::get().to(rentals::list_rentals::<I, R, P>))
                        .route("", web::post().to(rentals::create_rental::<I, R, P>))
                        .route("/{id}", web::get().to(rentals::get_rental::<I, R, P>))
                        .route("/{id}", web::delete().to(rentals::delete_rental::<I, R, P>))
                        .route(
                            "/{id}/status",
                            web::patch().to(rentals::update_rental_status::<I, R, P>),
                        )
                        .route(
                            "/{id}/payment",
                            web::get().to(payments::get_rental_payment::<I, R, P>),
                        ),
                )
                .service(
                    web::scope("/payments")
                        .wrap(jwt.clone())
                        .route("", web::get().to(payments::list_payments::<I, R, P>))
                        .route("", web::post().to(payments::create_payment::<I, R, P>))
                        .route("/{id}", web::get().to(payments::get_payment::<I, R, P>))
                        .route("/{id}", web::put().to(payments::update_payment::<I, R, P>))
                        .route("/{id}", web::delete().to(payments::delete_payment::<I, R, P>)),
                )
                .service(
                    web::scope("/me")
                        .wrap(jwt)
                        .route("/summary", web::get().to(account::summary::<I, R, P>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "renthub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "RentHub API v1",
        "authentication": "Bearer token (HS256 JWT, user id in `sub`)",
        "endpoints": {
            "health": "/health",
            "items": {
                "list": { "method": "GET", "path": "/api/v1/items", "query": ["category", "available", "owner_id", "page", "per_page"] },
                "get": { "method": "GET", "path": "/api/v1/items/{id}" },
                "create": { "method": "POST", "path": "/api/v1/items", "requires_auth": true },
                "update": { "method": "PUT", "path": "/api/v1/items/{id}", "requires_auth": true },
                "delete": { "method": "DELETE", "path": "/api/v1/items/{id}", "requires_auth": true }
            },
            "rentals": {
                "requires_auth": true,
                "list": { "method": "GET", "path": "/api/v1/rentals", "query": ["role", "page", "per_page"] },
                "get": { "method": "GET", "path": "/api/v1/rentals/{id}" },
                "create": { "method": "POST", "path": "/api/v1/rentals" },
                "update_status": { "method": "PATCH", "path": "/api/v1/rentals/{id}/status" },
                "delete": { "method": "DELETE", "path": "/api/v1/rentals/{id}" },
                "payment": { "method": "GET", "path": "/api/v1/rentals/{id}/payment" }
            },
            "payments": {
                "requires_auth": true,
                "list": { "method": "GET", "path": "/api/v1/payments", "query": ["status", "page", "per_page"] },
                "get": { "method": "GET", "path": "/api/v1/payments/{id}" },
                "create": {
                    "method": "POST",
                    "path": "/api/v1/payments",
                    "request_body": {
                        "rental_id": "uuid",
                        "amount": "number > 0",
                        "method": "non-empty string",
                        "status": "optional: pending | completed | failed | refunded"
                    },
                    "responses": {
                        "201": "Payment created",
                        "400": "Invalid amount or method",
                        "404": "Rental not found",
                        "409": "Rental already has a payment"
                    }
                },
                "update": { "method": "PUT", "path": "/api/v1/payments/{id}" },
                "delete": { "method": "DELETE", "path": "/api/v1/payments/{id}" }
            },
            "account": {
                "summary": { "method": "GET", "path": "/api/v1/me/summary", "requires_auth": true }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("The requested resource was not found"))
}
