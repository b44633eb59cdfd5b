// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::analytics_service::AnalyticsService;
use crate::application::report_service::ReportService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::memory_repository::InMemoryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;
    let today = chrono::Local::now().date_naive();

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemoryRepository::with_mock_data(&config.data, today));

    // Create services (application layer)
    let analytics_service = AnalyticsService::new(repository);
    let report_service = ReportService::new();

    // Create application state
    let state = Arc::new(AppState {
        analytics_service,
        report_service,
        filter_defaults: config.filters.clone(),
        ranking: config.ranking.clone(),
        pinned_today: config.data.anchor_date,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_address().parse()?;
    tracing::info!("Starting restaurant-analytics service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
