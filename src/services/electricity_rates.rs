use crate::services::roi_calculator::DEFAULT_ELECTRICITY_RATE;

/// Residential tariff per state (₹/kWh).
pub const REGIONAL_RATES: &[(&str, f64)] = &[
    ("Maharashtra", 9.5),
    ("Delhi", 8.0),
    ("Karnataka", 7.5),
    ("Telangana", 8.5),
    ("Tamil Nadu", 7.0),
    ("West Bengal", 8.0),
    ("Gujarat", 6.5),
    ("Rajasthan", 7.5),
];

/// Rate for a known region, or the national default.
pub fn rate_for_region(region: &str) -> f64 {
    find_region(region)
        .map(|(_, rate)| rate)
        .unwrap_or(DEFAULT_ELECTRICITY_RATE)
}

/// Pick the first comma-separated part of a place name that is a known
/// region, e.g. "Pune, Maharashtra, India" → "Maharashtra".
pub fn region_from_place(place_name: &str) -> Option<&'static str> {
    place_name
        .split(',')
        .find_map(|part| find_region(part))
        .map(|(name, _)| name)
}

fn find_region(name: &str) -> Option<(&'static str, f64)> {
    let name = name.trim();
    REGIONAL_RATES
        .iter()
        .find(|(region, _)| region.eq_ignore_ascii_case(name))
        .copied()
}
