//! CORS middleware configuration for cross-origin requests.
//!
//! With no configured origins (the development default) any origin is
//! allowed; otherwise only the listed origins are.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use rh_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, origin: &str) -> actix_web::http::StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_default_allows_any_origin() {
        let status = preflight(CorsConfig::default(), "http://localhost:3000").await;
        assert!(status.is_success());
    }

    #[actix_web::test]
    async fn test_restricted_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://renthub.app".to_string()],
            max_age: 600,
        };
        assert!(preflight(config.clone(), "https://renthub.app")
            .await
            .is_success());
        assert!(!preflight(config, "https://evil.example").await.is_success());
    }
}
