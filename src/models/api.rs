use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::roi::{FieldErrors, RawFormInput, RoiResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    #[schema(value_type = HashMap<String, String>)]
    pub errors: FieldErrors,
}

/// Where the production figures of a calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// NREL PVWatts for the resolved coordinates
    Pvwatts,
    /// Fixed yield-per-kW fallback
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input: RawFormInput,
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
    pub data_source: DataSource,
    pub result: RoiResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationSuggestion {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegionRate {
    pub region: String,
    /// ₹/kWh
    pub rate: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RateTableResponse {
    pub rates: Vec<RegionRate>,
    pub default_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OfflineModeBody {
    pub offline_mode: bool,
}
