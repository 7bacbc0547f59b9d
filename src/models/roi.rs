use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Input ───────────────────────────────────────────────────────────────────

/// Form values exactly as the user typed them. Numbers stay strings until
/// the validator has had a look at them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawFormInput {
    #[serde(default)]
    pub location: String,
    /// Roof area in square feet
    #[serde(default)]
    pub roof_area: String,
    /// Average monthly electricity bill (₹)
    #[serde(default)]
    pub monthly_bill: String,
}

impl RawFormInput {
    pub fn new(location: &str, roof_area: &str, monthly_bill: &str) -> Self {
        Self {
            location: location.to_string(),
            roof_area: roof_area.to_string(),
            monthly_bill: monthly_bill.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Location,
    RoofArea,
    MonthlyBill,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::RoofArea => "roofArea",
            Field::MonthlyBill => "monthlyBill",
        }
    }
}

/// One entry per field that currently fails its rule. Empty means accepted.
pub type FieldErrors = BTreeMap<Field, String>;

// ─── External data ───────────────────────────────────────────────────────────

/// Location-specific production estimate, either from PVWatts or from the
/// fixed fallback. The calculator treats both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSolarData {
    /// Annual AC production (kWh)
    #[serde(rename = "annualProductionKWh")]
    pub annual_production_kwh: f64,
    /// Average solar radiation (kWh/m²/day)
    pub solar_radiation: f64,
    /// Capacity factor (%)
    pub capacity_factor: f64,
}

// ─── Result ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPoint {
    pub year: u32,
    pub cumulative_net_savings: i64,
    pub cumulative_gross_savings: i64,
}

/// Split of the gross installation cost, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub equipment: i64,
    pub labour: i64,
    pub permits: i64,
    pub other: i64,
}

/// Complete ROI estimate for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    // ── Sizing ───────────────────────────────────────────────────────────────
    /// Installed capacity (kW, 2 decimals)
    #[serde(rename = "systemSizeKW")]
    pub system_size_kw: f64,
    /// Number of 400 W panels
    pub panel_count: u32,

    // ── Cost (₹) ─────────────────────────────────────────────────────────────
    pub system_cost_before_incentives: i64,
    pub subsidy_amount: i64,
    pub net_system_cost: i64,
    pub cost_breakdown: CostBreakdown,

    // ── Production ───────────────────────────────────────────────────────────
    #[serde(rename = "annualProductionKWh")]
    pub annual_production_kwh: f64,
    /// kWh/m²/day
    pub solar_radiation: f64,
    /// %
    pub capacity_factor: f64,
    /// ₹/kWh used for the estimate
    pub electricity_rate: f64,

    // ── Savings ──────────────────────────────────────────────────────────────
    pub first_year_savings: i64,
    /// Share of current consumption covered by solar, 0..=100
    pub percentage_offset: f64,
    /// Simple payback from year-1 figures (1 decimal)
    pub payback_period_years: f64,

    // ── 25-year projection ───────────────────────────────────────────────────
    pub savings_timeline: Vec<SavingsPoint>,
    pub lifetime_net_savings: i64,
    /// Ceiling of the simple payback period
    pub break_even_year: u32,
    /// First year the degraded/inflated timeline turns non-negative, if any
    pub timeline_break_even_year: Option<u32>,

    // ── Environmental ────────────────────────────────────────────────────────
    /// Metric tons of CO₂ avoided over the system lifetime
    pub co2_offset_tons: f64,
}
