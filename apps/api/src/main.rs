mod config;
mod distance;
mod errors;
mod layout;
mod places;
mod proposal;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::places::PlacesClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Proposal API v{}", env!("CARGO_PKG_VERSION"));

    let places = PlacesClient::new(
        config.google_maps_api_key.clone(),
        &config.places_base_url,
        config.places_timeout_secs,
    )
    .context("Failed to build Places HTTP client")?;
    if places.is_configured() {
        info!("Places client initialized ({})", config.places_base_url);
    } else {
        warn!("GOOGLE_MAPS_API_KEY not set; address lookups and driving distances are disabled");
    }

    let geocoder = Arc::new(places.clone());
    let state = AppState::new(config.clone(), places, geocoder);
    info!(
        office = %config.office_address,
        origin_airport = %config.origin_airport,
        "Proposal state initialized"
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
