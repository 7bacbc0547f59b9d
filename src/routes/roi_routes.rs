use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::roi_controller::{
    // Core
    validate_input, calculate_roi,
    // History
    get_history, clear_history,
    // Lookups
    get_rates, search_locations,
    // Settings
    get_offline_mode, set_offline_mode,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/validate",               post(validate_input))
        .route("/calculate",              post(calculate_roi))
        .route("/history",                get(get_history).delete(clear_history))
        .route("/rates",                  get(get_rates))
        .route("/locations",              get(search_locations))
        .route("/settings/offline-mode",  get(get_offline_mode).post(set_offline_mode))
        .with_state(state)
}
