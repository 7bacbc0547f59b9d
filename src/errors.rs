use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::roi::{Field, FieldErrors};

/// Inputs the calculator refuses to turn into non-finite figures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("{name} must be a positive number, got {value:?}", name = .field.as_str())]
    InvalidInput { field: Field, value: String },
    #[error("electricity rate must be a positive number, got {0}")]
    InvalidRate(f64),
    #[error("annual production must be a non-negative number, got {0}")]
    InvalidSolarData(f64),
    #[error("first-year savings are zero, payback period is undefined")]
    NoSavings,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Could not find location. Try entering city and state.")]
    NotFound(String),
    #[error("Could not find location. Try entering city and state.")]
    Request(#[from] reqwest::Error),
    #[error("invalid geocoding base url: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum SolarDataError {
    #[error("PVWatts request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("PVWatts returned no usable outputs: {0}")]
    Upstream(String),
}

/// Everything a handler can fail with, mapped onto a status code and a JSON
/// body by `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("input validation failed")]
    Validation(FieldErrors),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "Invalid input", "errors": errors })),
            )
                .into_response(),
            ApiError::Calculation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
            ApiError::Geocode(e) => {
                let status = match e {
                    GeocodeError::NotFound(_) => StatusCode::NOT_FOUND,
                    GeocodeError::Request(_) => StatusCode::BAD_GATEWAY,
                    GeocodeError::InvalidBaseUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, Json(json!({ "error": e.to_string() }))).into_response()
            }
        }
    }
}
