//! OpenAPI documentation for the BatePapo API
//!
//! This module provides Swagger/OpenAPI documentation for all API endpoints.

use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BatePapo API",
        version = "1.0.0",
        description = "Chat room backend.\n\n## Features\n- Register participants and announce joins\n- Post public, private and status messages\n- Poll the message log with per-caller visibility\n- Heartbeat to stay in the room; inactive participants are swept out",
        license(name = "MIT"),
        contact(name = "BatePapo Team")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "participants", description = "Participant registration and listing"),
        (name = "messages", description = "Posting and reading messages"),
        (name = "status", description = "Heartbeats keeping participants alive"),
        (name = "health", description = "Service health"),
        (name = "metrics", description = "Prometheus metrics")
    ),
    paths(
        // Participants
        crate::api::participants::register,
        crate::api::participants::list,
        // Messages
        crate::api::messages::create,
        crate::api::messages::list,
        // Status
        crate::api::status::heartbeat,
        // Health
        crate::api::health::health_check,
        // Metrics / Prometheus
        crate::api::metrics::metrics_handler,
    ),
    components(
        schemas(
            crate::models::Participant,
            crate::models::RegisterRequest,
            crate::models::Message,
            crate::models::MessageKind,
            crate::models::PostMessageRequest,
            crate::api::health::HealthResponse,
        )
    )
)]
pub struct ApiDoc;
