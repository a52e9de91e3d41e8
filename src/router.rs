use axum::http::{HeaderValue, Method};
use axum::response::Json;
use axum::routing::get;
use axum::{Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::batches::router::init_batches_router;
use crate::modules::bookings::router::init_bookings_router;
use crate::modules::certificates::router::init_certificates_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::institutes::router::init_institutes_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "Seatrain API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/swagger-ui",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "environment": std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string()),
    }))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(service_info))
        .route("/health", get(health))
        .nest("/auth", init_auth_router())
        .nest("/institutes", init_institutes_router())
        .nest("/courses", init_courses_router())
        .nest("/batches", init_batches_router())
        .nest("/bookings", init_bookings_router())
        .nest("/certificates", init_certificates_router())
        .nest("/students", init_students_router())
        .nest("/admin", init_admin_router())
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
