use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::config::GeocodingConfig;
use crate::errors::GeocodeError;
use crate::models::api::LocationSuggestion;
use crate::models::external::{GeoLocation, GeocodingResponse};

// New Delhi, used whenever no geocoder is configured
const DEFAULT_LATITUDE: f64 = 28.6139;
const DEFAULT_LONGITUDE: f64 = 77.2090;
const DEFAULT_PLACE: &str = "Delhi, India";

const MIN_QUERY_CHARS: usize = 2;
const MAX_SUGGESTIONS: usize = 5;
const PLACE_TYPES: &str = "place,locality";

/// Suggestions offered when autocomplete has no geocoder behind it.
const KNOWN_CITIES: &[&str] = &[
    "Mumbai, Maharashtra",
    "Delhi, Delhi",
    "Bangalore, Karnataka",
    "Hyderabad, Telangana",
    "Chennai, Tamil Nadu",
    "Kolkata, West Bengal",
    "Pune, Maharashtra",
    "Ahmedabad, Gujarat",
    "Jaipur, Rajasthan",
    "Surat, Gujarat",
];

fn places_url(cfg: &GeocodingConfig, query: &str) -> Result<Url, GeocodeError> {
    let mut url =
        Url::parse(&cfg.base_url).map_err(|e| GeocodeError::InvalidBaseUrl(e.to_string()))?;
    let file = format!("{}.json", query);
    url.path_segments_mut()
        .map_err(|_| GeocodeError::InvalidBaseUrl(cfg.base_url.clone()))?
        .pop_if_empty()
        .extend(["geocoding", "v5", "mapbox.places", file.as_str()]);
    Ok(url)
}

async fn fetch_places(
    client: &Client,
    cfg: &GeocodingConfig,
    token: &str,
    query: &str,
    limit: usize,
) -> Result<GeocodingResponse, GeocodeError> {
    let limit = limit.to_string();
    let response = client
        .get(places_url(cfg, query)?)
        .query(&[
            ("access_token", token),
            ("country", cfg.country.as_str()),
            ("limit", limit.as_str()),
            ("types", PLACE_TYPES),
        ])
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json::<GeocodingResponse>().await?)
}

/// Default coordinates, keeping the query (if any) as place name.
pub fn default_location(query: &str) -> GeoLocation {
    let query = query.trim();
    let place_name = if query.is_empty() { DEFAULT_PLACE } else { query };
    GeoLocation {
        latitude: DEFAULT_LATITUDE,
        longitude: DEFAULT_LONGITUDE,
        place_name: place_name.to_string(),
    }
}

/// Resolve free text to coordinates and a canonical place name.
///
/// Without a Mapbox token this never fails and returns the default
/// coordinates, keeping the query as place name.
pub async fn geocode(
    client: &Client,
    cfg: &GeocodingConfig,
    query: &str,
) -> Result<GeoLocation, GeocodeError> {
    let query = query.trim();
    let Some(token) = cfg.token() else {
        warn!("Mapbox token not configured, using default coordinates");
        return Ok(default_location(query));
    };

    let places = fetch_places(client, cfg, token, query, 1).await?;
    let feature = places
        .features
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

    let [longitude, latitude] = feature.center;
    debug!(query, place = %feature.place_name, latitude, longitude, "Geocoded location");
    Ok(GeoLocation { latitude, longitude, place_name: feature.place_name })
}

/// Autocomplete suggestions. Short queries and upstream failures yield an
/// empty list.
pub async fn search_locations(
    client: &Client,
    cfg: &GeocodingConfig,
    query: &str,
) -> Vec<LocationSuggestion> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let Some(token) = cfg.token() else {
        let needle = query.to_lowercase();
        return KNOWN_CITIES
            .iter()
            .filter(|city| city.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .map(|city| LocationSuggestion { id: city.to_string(), name: city.to_string() })
            .collect();
    };

    match fetch_places(client, cfg, token, query, MAX_SUGGESTIONS).await {
        Ok(places) => places
            .features
            .into_iter()
            .map(|f| LocationSuggestion { id: f.id, name: f.place_name })
            .collect(),
        Err(e) => {
            warn!(error = %e, query, "Location search failed");
            Vec::new()
        }
    }
}
