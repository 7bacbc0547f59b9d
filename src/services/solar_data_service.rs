use reqwest::Client;
use tracing::{debug, warn};

use crate::config::PvWattsConfig;
use crate::errors::SolarDataError;
use crate::models::api::DataSource;
use crate::models::external::PvWattsResponse;
use crate::models::roi::ExternalSolarData;
use crate::services::roi_calculator;

// South-facing, fixed roof mount, standard modules
const AZIMUTH_DEG: &str = "180";
const ARRAY_TYPE: &str = "1";
const MODULE_TYPE: &str = "0";

/// Annual production estimate from NREL PVWatts v8.
pub async fn fetch_pvwatts(
    client: &Client,
    cfg: &PvWattsConfig,
    lat: f64,
    lon: f64,
    capacity_kw: f64,
) -> Result<ExternalSolarData, SolarDataError> {
    let url = format!("{}/api/pvwatts/v8.json", cfg.base_url.trim_end_matches('/'));
    let params = [
        ("api_key", cfg.api_key.clone()),
        ("lat", lat.to_string()),
        ("lon", lon.to_string()),
        ("system_capacity", format!("{:.3}", capacity_kw)),
        ("azimuth", AZIMUTH_DEG.to_string()),
        ("tilt", cfg.tilt.to_string()),
        ("array_type", ARRAY_TYPE.to_string()),
        ("module_type", MODULE_TYPE.to_string()),
        ("losses", cfg.losses.to_string()),
    ];

    let resp = client
        .get(&url)
        .query(&params)
        .send()
        .await?
        .error_for_status()?
        .json::<PvWattsResponse>()
        .await?;

    if !resp.errors.is_empty() {
        return Err(SolarDataError::Upstream(resp.errors.join("; ")));
    }
    let outputs = resp
        .outputs
        .ok_or_else(|| SolarDataError::Upstream("missing outputs".to_string()))?;
    if !outputs.ac_annual.is_finite() || outputs.ac_annual <= 0.0 {
        return Err(SolarDataError::Upstream(format!(
            "unusable ac_annual {}",
            outputs.ac_annual
        )));
    }

    Ok(ExternalSolarData {
        annual_production_kwh: outputs.ac_annual,
        solar_radiation: outputs.solrad_annual,
        capacity_factor: outputs.capacity_factor,
    })
}

/// Location-specific production, degrading to the fixed per-kW estimate
/// whenever PVWatts cannot be reached or returns nothing usable.
pub async fn get_solar_data(
    client: &Client,
    cfg: &PvWattsConfig,
    lat: f64,
    lon: f64,
    capacity_kw: f64,
) -> (ExternalSolarData, DataSource) {
    match fetch_pvwatts(client, cfg, lat, lon, capacity_kw).await {
        Ok(data) => {
            debug!(lat, lon, capacity_kw, production_kwh = data.annual_production_kwh, "PVWatts estimate");
            (data, DataSource::Pvwatts)
        }
        Err(e) => {
            warn!(error = %e, "PVWatts unavailable, using fallback estimate");
            (get_offline_data(capacity_kw), DataSource::Fallback)
        }
    }
}

/// Pure offline estimate – no network calls.
pub fn get_offline_data(capacity_kw: f64) -> ExternalSolarData {
    roi_calculator::fallback_solar_data(capacity_kw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config_for(server_url: String) -> PvWattsConfig {
        PvWattsConfig { base_url: server_url, ..Default::default() }
    }

    #[tokio::test]
    async fn uses_pvwatts_outputs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/pvwatts/v8.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), "DEMO_KEY".into()),
                Matcher::UrlEncoded("system_capacity".into(), "20.067".into()),
                Matcher::UrlEncoded("azimuth".into(), "180".into()),
                Matcher::UrlEncoded("tilt".into(), "20".into()),
                Matcher::UrlEncoded("losses".into(), "14".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "errors": [],
                    "outputs": { "ac_annual": 31250.4, "solrad_annual": 5.62, "capacity_factor": 17.8 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let (data, source) =
            get_solar_data(&Client::new(), &config_for(server.url()), 28.61, 77.21, 20.067048).await;

        assert_eq!(source, DataSource::Pvwatts);
        assert_eq!(data.annual_production_kwh, 31250.4);
        assert_eq!(data.solar_radiation, 5.62);
        assert_eq!(data.capacity_factor, 17.8);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn falls_back_on_http_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/pvwatts/v8.json")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let (data, source) =
            get_solar_data(&Client::new(), &config_for(server.url()), 19.07, 72.87, 10.0).await;

        assert_eq!(source, DataSource::Fallback);
        assert_abs_diff_eq!(data.annual_production_kwh, 14_500.0);
        assert_eq!(data.solar_radiation, 5.5);
        assert_eq!(data.capacity_factor, 16.5);
    }

    #[tokio::test]
    async fn upstream_errors_are_not_outputs() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/pvwatts/v8.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "errors": ["lat out of range"] }).to_string())
            .create_async()
            .await;

        let err = fetch_pvwatts(&Client::new(), &config_for(server.url()), 95.0, 0.0, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, SolarDataError::Upstream(ref msg) if msg.contains("lat out of range")));
    }

    #[tokio::test]
    async fn zero_production_falls_back() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/pvwatts/v8.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "errors": [],
                    "outputs": { "ac_annual": 0.0, "solrad_annual": 0.0, "capacity_factor": 0.0 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let cfg = config_for(server.url());
        let err = fetch_pvwatts(&Client::new(), &cfg, 28.61, 77.21, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, SolarDataError::Upstream(ref msg) if msg.contains("ac_annual")));

        let (data, source) = get_solar_data(&Client::new(), &cfg, 28.61, 77.21, 10.0).await;
        assert_eq!(source, DataSource::Fallback);
        assert_abs_diff_eq!(data.annual_production_kwh, 14_500.0);
    }
}
