use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::GeocodingConfig;
use crate::errors::ApiError;
use crate::models::api::{
    CalculationResponse, DataSource, LocationQuery, LocationSuggestion, OfflineModeBody,
    RateTableResponse, RegionRate, ValidationResponse,
};
use crate::models::roi::RawFormInput;
use crate::services::{
    electricity_rates, geocoding_service, roi_calculator, solar_data_service, validator,
};
use crate::shared_state::AppState;

/// POST /api/validate
/// Check form input without calculating
///
/// Always answers 200; `errors` holds one message per invalid field.
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = RawFormInput,
    responses(
        (status = 200, description = "Field-level validation result", body = ValidationResponse)
    )
)]
pub async fn validate_input(Json(input): Json<RawFormInput>) -> impl IntoResponse {
    let errors = validator::validate(&input);
    Json(ValidationResponse { valid: errors.is_empty(), errors })
}

/// POST /api/calculate
/// Estimate the return of a rooftop installation
///
/// Validates the form, resolves the location and its regional tariff, looks up a
/// production estimate (falling back to a fixed yield per kW) and runs the
/// 25-year projection. The result is appended to the calculation history.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = RawFormInput,
    responses(
        (status = 200, description = "ROI estimate", body = CalculationResponse),
        (status = 404, description = "Location not found"),
        (status = 422, description = "Invalid input"),
        (status = 502, description = "Geocoding service unavailable")
    )
)]
pub async fn calculate_roi(
    State(state): State<AppState>,
    Json(input): Json<RawFormInput>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let errors = validator::validate(&input);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let offline = state.is_offline();
    let config = &state.config;

    let location = if offline {
        geocoding_service::default_location(&input.location)
    } else {
        geocoding_service::geocode(&state.client, &config.geocoding, &input.location)
            .await
            .inspect_err(|e| warn!(error = ?e, location = %input.location, "Geocoding failed"))?
    };

    let region = electricity_rates::region_from_place(&location.place_name);
    let rate = region.map(electricity_rates::rate_for_region);

    let capacity_kw = validator::parse_number(&input.roof_area)
        .map(roi_calculator::system_size_kw)
        .unwrap_or_default();
    let (solar, data_source) = if offline {
        (solar_data_service::get_offline_data(capacity_kw), DataSource::Fallback)
    } else {
        solar_data_service::get_solar_data(
            &state.client,
            &config.pvwatts,
            location.latitude,
            location.longitude,
            capacity_kw,
        )
        .await
    };

    let result = roi_calculator::calculate(&input, Some(&solar), rate)?;

    info!(
        place = %location.place_name,
        system_kw = result.system_size_kw,
        net_cost = result.net_system_cost,
        payback_years = result.payback_period_years,
        source = ?data_source,
        "Calculation complete"
    );

    let response = CalculationResponse {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        input,
        place_name: location.place_name,
        latitude: location.latitude,
        longitude: location.longitude,
        region: region.map(str::to_string),
        data_source,
        result,
    };
    state.record(response.clone());

    Ok(Json(response))
}

/// GET /api/history
/// Past calculations, newest first
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Recorded calculations", body = Vec<CalculationResponse>)
    )
)]
pub async fn get_history(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.history())
}

/// DELETE /api/history
#[utoipa::path(
    delete,
    path = "/api/history",
    responses(
        (status = 204, description = "History cleared")
    )
)]
pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    state.clear_history();
    StatusCode::NO_CONTENT
}

/// GET /api/rates
/// Regional residential tariffs used for the estimate
#[utoipa::path(
    get,
    path = "/api/rates",
    responses(
        (status = 200, description = "Rate table", body = RateTableResponse)
    )
)]
pub async fn get_rates() -> impl IntoResponse {
    let rates = electricity_rates::REGIONAL_RATES
        .iter()
        .map(|(region, rate)| RegionRate { region: region.to_string(), rate: *rate })
        .collect();
    Json(RateTableResponse { rates, default_rate: roi_calculator::DEFAULT_ELECTRICITY_RATE })
}

/// GET /api/locations?q=
/// Location autocomplete
#[utoipa::path(
    get,
    path = "/api/locations",
    params(
        ("q" = String, Query, description = "Partial place name, at least 2 characters")
    ),
    responses(
        (status = 200, description = "Up to five suggestions", body = Vec<LocationSuggestion>)
    )
)]
pub async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> impl IntoResponse {
    if state.is_offline() {
        // Token-less search only filters the built-in city list
        let offline_cfg = GeocodingConfig::default();
        return Json(geocoding_service::search_locations(&state.client, &offline_cfg, &query.q).await);
    }
    Json(geocoding_service::search_locations(&state.client, &state.config.geocoding, &query.q).await)
}

/// GET /api/settings/offline-mode
#[utoipa::path(
    get,
    path = "/api/settings/offline-mode",
    responses(
        (status = 200, description = "Current offline mode", body = OfflineModeBody)
    )
)]
pub async fn get_offline_mode(State(state): State<AppState>) -> impl IntoResponse {
    Json(OfflineModeBody { offline_mode: state.is_offline() })
}

/// POST /api/settings/offline-mode
/// Skip all outbound lookups and use fallback estimates
#[utoipa::path(
    post,
    path = "/api/settings/offline-mode",
    request_body = OfflineModeBody,
    responses(
        (status = 200, description = "Updated offline mode", body = OfflineModeBody)
    )
)]
pub async fn set_offline_mode(
    State(state): State<AppState>,
    Json(body): Json<OfflineModeBody>,
) -> impl IntoResponse {
    state.set_offline(body.offline_mode);
    info!(offline_mode = body.offline_mode, "Offline mode changed");
    Json(OfflineModeBody { offline_mode: state.is_offline() })
}
