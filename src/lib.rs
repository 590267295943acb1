//! BatePapo Backend Library
//!
//! This library contains all the core components of the BatePapo chat backend.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod presence;

use axum::http::{header, HeaderName, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::api::AppState;

/// Create the application router with the given state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Participants
        .route("/participants", post(api::participants::register))
        .route("/participants", get(api::participants::list))
        // Messages
        .route("/messages", post(api::messages::create))
        .route("/messages", get(api::messages::list))
        // Heartbeats
        .route("/status", post(api::status::heartbeat))
        // Metrics (Prometheus)
        .route("/metrics", get(api::metrics::metrics_handler))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Create CORS layer with secure configuration
fn cors_layer() -> CorsLayer {
    // Allow origins from environment or default to localhost for development
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(api::USER_HEADER),
        ])
}
