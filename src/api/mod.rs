pub mod health;
pub mod messages;
pub mod metrics;
pub mod openapi;
pub mod participants;
pub mod status;

use axum::http::HeaderMap;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::db::Database;

/// Trusted request header naming the caller.
pub const USER_HEADER: &str = "user";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Read the caller's name from the `user` header. Returns None when the
/// header is absent or not valid UTF-8.
pub fn identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_owned())
}
