use utoipa::OpenApi;

use crate::controllers::roi_controller;
use crate::models::{api, roi};

#[derive(OpenApi)]
#[openapi(
    paths(
        roi_controller::validate_input,
        roi_controller::calculate_roi,
        roi_controller::get_history,
        roi_controller::clear_history,
        roi_controller::get_rates,
        roi_controller::search_locations,
        roi_controller::get_offline_mode,
        roi_controller::set_offline_mode
    ),
    components(
        schemas(
            roi::RawFormInput,
            roi::RoiResult,
            roi::SavingsPoint,
            roi::CostBreakdown,
            roi::ExternalSolarData,
            api::ValidationResponse,
            api::CalculationResponse,
            api::DataSource,
            api::LocationSuggestion,
            api::RateTableResponse,
            api::RegionRate,
            api::OfflineModeBody
        )
    ),
    tags(
        (name = "solar-roi", description = "Rooftop Solar ROI Estimator API")
    )
)]
pub struct ApiDoc;
