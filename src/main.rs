// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::aqi_service::AqiService;
use crate::application::estimation_service::EstimationService;
use crate::application::route_advisor::RouteAdvisor;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::google_directions_client::GoogleDirectionsClient;
use crate::infrastructure::model_loader::load_prediction_strategy;
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_predictor=debug,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Prediction strategy is chosen once and shared read-only
    let strategy = load_prediction_strategy(config.model.path.as_deref());
    tracing::info!("Prediction strategy: {}", strategy.name());

    // Create providers (infrastructure layer)
    let provider = Arc::new(OpenWeatherClient::new(&config.openweather)?);
    let directions = Arc::new(GoogleDirectionsClient::new(&config.directions)?);
    if !directions.is_configured() {
        tracing::warn!("GOOGLE_API_KEY is not set; /routes will report the provider as unavailable");
    }

    // Create services (application layer)
    let estimation = EstimationService::new(strategy, config.synthesis.clone());
    let aqi_service = AqiService::new(provider.clone(), estimation);
    let route_advisor = RouteAdvisor::new(directions, provider);

    let state = Arc::new(AppState {
        aqi_service,
        route_advisor,
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting AQI predictor service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
