use serde::Deserialize;

// ─── Mapbox Places v5 ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingFeature {
    #[serde(default)]
    pub id: String,
    pub place_name: String,
    /// `[longitude, latitude]`
    pub center: [f64; 2],
}

// ─── NREL PVWatts v8 ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PvWattsResponse {
    #[serde(default)]
    pub errors: Vec<String>,
    pub outputs: Option<PvWattsOutputs>,
}

#[derive(Debug, Deserialize)]
pub struct PvWattsOutputs {
    /// Annual AC system output (kWh)
    pub ac_annual: f64,
    /// Annual average solar radiation (kWh/m²/day)
    pub solrad_annual: f64,
    /// %
    pub capacity_factor: f64,
}

// ─── Resolved location ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: String,
}
