use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use paging_server::paging::PagingConfig;
use paging_server::web::{AppState, create_router};

/// Address used when `PAGING_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Read configuration from environment (fail fast if invalid)
    let config = match PagingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    info!(
        search_window_mins = config.default_search_window_mins,
        max_itineraries = config.max_itineraries,
        "loaded paging configuration"
    );

    let addr_str = std::env::var("PAGING_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("invalid PAGING_ADDR {addr_str:?}: {e}");
            std::process::exit(1);
        }
    };

    // Build app state and router
    let state = AppState::new(config);
    let app = create_router(state);

    info!("Itinerary paging server listening on http://{addr}");
    info!("  GET  /health         - Health check");
    info!("  POST /paging/plan    - Crop a result and compute page cursors");
    info!("  GET  /paging/cursor  - Decode a page cursor token");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
