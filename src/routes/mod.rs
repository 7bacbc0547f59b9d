pub mod roi_routes;

use axum::{response::Html, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::shared_state::AppState;

/// Full application: JSON API, interactive docs and the static dashboard.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    Router::new()
        .nest("/api", roi_routes::api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
