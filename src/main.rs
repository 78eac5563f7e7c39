// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::export_service::ExportService;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::generator::MapArea;
use crate::infrastructure::config::{load_dashboard_config, DashboardConfig, SourceKind};
use crate::infrastructure::csv_repository::CsvRepository;
use crate::infrastructure::synthetic_repository::SyntheticRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = build_repository(&config);

    // Create services (application layer)
    let dashboard_service = Arc::new(DashboardService::new(repository, config.clone()));
    let export_service = Arc::new(ExportService::new(
        dashboard_service.clone(),
        config.export.file_name.clone(),
    ));

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        export_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address {:?}", config.server.bind))?;
    tracing::info!("Starting plant-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_repository(config: &DashboardConfig) -> Arc<dyn TelemetryRepository> {
    let map_area = MapArea {
        center_lat: config.map.center_lat,
        center_lon: config.map.center_lon,
        spread: config.map.spread,
    };
    let seed = config.generator.seed;

    match (&config.source.kind, &config.source.path) {
        (SourceKind::Csv, Some(path)) => {
            tracing::info!("Serving recorded readings from {}", path.display());
            Arc::new(CsvRepository::new(path.clone(), map_area, seed))
        }
        _ => {
            tracing::info!(
                "Serving synthetic readings for {} sensors (seed {})",
                config.generator.sensors,
                seed
            );
            Arc::new(SyntheticRepository::new(map_area, seed))
        }
    }
}
