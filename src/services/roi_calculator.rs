//! ============================================================
//!  Rooftop Solar ROI Projection
//!
//!  Pipeline:
//!   1. Sizing        – roof area → nameplate capacity (kW)
//!   2. Production    – external estimate or fixed yield per kW
//!   3. Cost          – gross cost, subsidy, net cost
//!   4. Savings       – consumption offset, first-year savings
//!   5. Payback       – simple, from undegraded year-1 figures
//!   6. Timeline      – 25 years with degradation and tariff inflation
//!   7. Environmental – CO₂ avoided over the full timeline
//! ============================================================

use crate::errors::CalculationError;
use crate::models::roi::{
    CostBreakdown, ExternalSolarData, Field, RawFormInput, RoiResult, SavingsPoint,
};
use crate::services::validator::parse_number;

// ─── Physical constants ──────────────────────────────────────
const SQ_FT_TO_SQ_M: f64 = 0.092903;
/// Nameplate irradiance (W/m²)
const WATTS_PER_SQ_M: f64 = 1000.0;
const PANEL_EFFICIENCY: f64 = 0.18;
pub const PANEL_WATTAGE: f64 = 400.0;

// ─── Market assumptions (India) ──────────────────────────────
/// Installed cost (₹/W)
pub const COST_PER_WATT: f64 = 45.0;
pub const SUBSIDY_RATE: f64 = 0.20;
/// ₹/kWh when no regional rate is known
pub const DEFAULT_ELECTRICITY_RATE: f64 = 8.0;
/// Grid emission factor (kg CO₂/kWh)
const CO2_KG_PER_KWH: f64 = 0.82;

// ─── Fallback production estimate ────────────────────────────
/// kWh per installed kW per year
pub const FALLBACK_YIELD_KWH_PER_KW: f64 = 1450.0;
pub const FALLBACK_SOLAR_RADIATION: f64 = 5.5;
pub const FALLBACK_CAPACITY_FACTOR: f64 = 16.5;

// ─── Lifetime model ──────────────────────────────────────────
pub const SYSTEM_LIFETIME_YEARS: u32 = 25;
const ANNUAL_DEGRADATION: f64 = 0.005;
const TARIFF_INFLATION: f64 = 0.025;

// ─── Cost breakdown shares ───────────────────────────────────
const EQUIPMENT_SHARE: f64 = 0.50;
const LABOUR_SHARE: f64 = 0.25;
const PERMITS_SHARE: f64 = 0.10;
const OTHER_SHARE: f64 = 0.15;

/// Nameplate capacity (kW) that fits on the given roof.
pub fn system_size_kw(roof_area_sqft: f64) -> f64 {
    let roof_area_m2 = roof_area_sqft * SQ_FT_TO_SQ_M;
    roof_area_m2 * WATTS_PER_SQ_M * PANEL_EFFICIENCY / 1000.0
}

/// Production estimate used when no location-specific data is available.
pub fn fallback_solar_data(capacity_kw: f64) -> ExternalSolarData {
    ExternalSolarData {
        annual_production_kwh: capacity_kw * FALLBACK_YIELD_KWH_PER_KW,
        solar_radiation: FALLBACK_SOLAR_RADIATION,
        capacity_factor: FALLBACK_CAPACITY_FACTOR,
    }
}

/// Run the full projection for already validated input.
///
/// * `solar` – location-specific production; `None` uses the fixed yield
/// * `electricity_rate` – ₹/kWh for the user's region; `None` uses the default
///
/// Fails instead of producing non-finite figures when the inputs are not
/// positive, overflow, or when first-year savings are too small to pay back.
pub fn calculate(
    input: &RawFormInput,
    solar: Option<&ExternalSolarData>,
    electricity_rate: Option<f64>,
) -> Result<RoiResult, CalculationError> {
    let roof_area = positive_field(&input.roof_area, Field::RoofArea)?;
    let monthly_bill = positive_field(&input.monthly_bill, Field::MonthlyBill)?;
    let rate = match electricity_rate {
        None => DEFAULT_ELECTRICITY_RATE,
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => return Err(CalculationError::InvalidRate(r)),
    };

    // ── 1. Sizing ──────────────────────────────────────────────
    let size_kw = system_size_kw(roof_area);
    let system_cost = size_kw * 1000.0 * COST_PER_WATT;
    if !system_cost.is_finite() {
        return Err(CalculationError::InvalidInput {
            field: Field::RoofArea,
            value: input.roof_area.clone(),
        });
    }
    let panel_count = (size_kw * 1000.0 / PANEL_WATTAGE).ceil() as u32;

    // ── 2. Production ─────────────────────────────────────────
    let solar = match solar {
        Some(data) => *data,
        None => fallback_solar_data(size_kw),
    };
    let annual_production = solar.annual_production_kwh;
    if !annual_production.is_finite() || annual_production < 0.0 {
        return Err(CalculationError::InvalidSolarData(annual_production));
    }

    // ── 3. Cost ───────────────────────────────────────────────
    let subsidy = system_cost * SUBSIDY_RATE;
    let net_cost = system_cost - subsidy;

    // ── 4. First-year savings ─────────────────────────────────
    let annual_bill = monthly_bill * 12.0;
    if !annual_bill.is_finite() {
        return Err(CalculationError::InvalidInput {
            field: Field::MonthlyBill,
            value: input.monthly_bill.clone(),
        });
    }
    let current_usage_kwh = annual_bill / rate;
    let percentage_offset = (annual_production / current_usage_kwh * 100.0).min(100.0);
    // Savings cannot exceed what was being spent
    let first_year_savings = (annual_production * rate).min(annual_bill);
    if first_year_savings <= 0.0 {
        return Err(CalculationError::NoSavings);
    }

    // ── 5. Simple payback ─────────────────────────────────────
    let raw_payback = net_cost / first_year_savings;
    // Vanishing savings give a payback no break-even year can express
    if !raw_payback.is_finite() || raw_payback > u32::MAX as f64 {
        return Err(CalculationError::NoSavings);
    }
    let payback_years = round_to(raw_payback, 1);

    // ── 6. Timeline ───────────────────────────────────────────
    let mut savings_timeline = Vec::with_capacity(SYSTEM_LIFETIME_YEARS as usize);
    let mut cumulative_gross = 0.0;
    let mut lifetime_production = 0.0;
    for year in 1..=SYSTEM_LIFETIME_YEARS {
        let elapsed = (year - 1) as i32;
        let production = annual_production * (1.0 - ANNUAL_DEGRADATION).powi(elapsed);
        let year_rate = rate * (1.0 + TARIFF_INFLATION).powi(elapsed);

        cumulative_gross += production * year_rate;
        lifetime_production += production;

        savings_timeline.push(SavingsPoint {
            year,
            cumulative_net_savings: rupees(cumulative_gross - net_cost),
            cumulative_gross_savings: rupees(cumulative_gross),
        });
    }

    let lifetime_net_savings = savings_timeline
        .last()
        .map_or(0, |p| p.cumulative_net_savings);
    // Kept apart from the simple payback on purpose; the two usually disagree.
    let timeline_break_even_year = savings_timeline
        .iter()
        .find(|p| p.cumulative_net_savings >= 0)
        .map(|p| p.year);

    // ── 7. Environmental ──────────────────────────────────────
    let co2_offset_tons = lifetime_production * CO2_KG_PER_KWH / 1000.0;

    // ── 8. Packaging ──────────────────────────────────────────
    let system_cost_rounded = rupees(system_cost);
    let subsidy_rounded = rupees(subsidy);

    Ok(RoiResult {
        system_size_kw: round_to(size_kw, 2),
        panel_count,
        system_cost_before_incentives: system_cost_rounded,
        subsidy_amount: subsidy_rounded,
        net_system_cost: system_cost_rounded - subsidy_rounded,
        cost_breakdown: CostBreakdown {
            equipment: rupees(system_cost * EQUIPMENT_SHARE),
            labour: rupees(system_cost * LABOUR_SHARE),
            permits: rupees(system_cost * PERMITS_SHARE),
            other: rupees(system_cost * OTHER_SHARE),
        },
        annual_production_kwh: annual_production.round(),
        solar_radiation: solar.solar_radiation,
        capacity_factor: solar.capacity_factor,
        electricity_rate: rate,
        first_year_savings: rupees(first_year_savings),
        percentage_offset: percentage_offset.round(),
        payback_period_years: payback_years,
        savings_timeline,
        lifetime_net_savings,
        break_even_year: raw_payback.ceil() as u32,
        timeline_break_even_year,
        co2_offset_tons: round_to(co2_offset_tons, 1),
    })
}

fn positive_field(raw: &str, field: Field) -> Result<f64, CalculationError> {
    parse_number(raw)
        .filter(|v| *v > 0.0)
        .ok_or_else(|| CalculationError::InvalidInput {
            field,
            value: raw.to_string(),
        })
}

#[inline]
fn rupees(value: f64) -> i64 {
    value.round() as i64
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
