use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use solar_roi::config::Config;
use solar_roi::routes;
use solar_roi::shared_state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("solar_roi=info,tower_http=info")),
        )
        .init();

    // 1. Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match Config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %config_path, error = %e, "Failed to load configuration");
            return;
        }
    };
    info!(
        offline_mode = config.offline_mode,
        geocoder = config.geocoding.token().is_some(),
        "Configuration loaded"
    );

    // 2. Initialize shared state
    let server_port = config.server.port;
    let state = match AppState::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return;
        }
    };

    // 3. Start Axum HTTP server
    let app = routes::app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
        error!(error = %e, "Server error");
    }
}
