use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use batepapo_backend::{api::AppState, config::Config, create_router, db::Database, presence};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BatePapo Backend");

    // Load configuration
    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let db = Database::new(&config.database_url).await?;
    db.run_migrations().await?;
    tracing::info!("Database initialized");

    // Install the Prometheus recorder backing /metrics
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(
        "batepapo_participants_registered_total",
        "Participants successfully registered"
    );
    metrics::describe_counter!(
        "batepapo_messages_posted_total",
        "Messages accepted via POST /messages"
    );
    metrics::describe_counter!(
        "batepapo_participants_swept_total",
        "Participants removed by the inactivity sweep"
    );

    // Build application state
    let state = AppState::new(db, config.clone()).with_metrics(metrics_handle);

    // Spawn the inactivity sweeper
    let _sweeper = presence::spawn_sweeper(state.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
