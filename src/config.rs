use std::path::Path;

use serde::Deserialize;

fn default_port() -> u16 { 8080 }
fn default_static_dir() -> String { "static".to_string() }
fn default_mapbox_url() -> String { "https://api.mapbox.com".to_string() }
fn default_country() -> String { "IN".to_string() }
fn default_pvwatts_url() -> String { "https://developer.nrel.gov".to_string() }
fn default_api_key() -> String { "DEMO_KEY".to_string() }
fn default_tilt() -> f64 { 20.0 }
fn default_losses() -> f64 { 14.0 }
fn default_timeout() -> u64 { 10 }
fn default_history_limit() -> usize { 20 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Skip all outbound lookups and use the fallback estimates
    #[serde(default)]
    pub offline_mode: bool,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub pvwatts: PvWattsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Without a token, lookups resolve to the default coordinates
    #[serde(default)]
    pub mapbox_token: Option<String>,
    #[serde(default = "default_mapbox_url")]
    pub base_url: String,
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PvWattsConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_pvwatts_url")]
    pub base_url: String,
    /// Panel tilt (degrees)
    #[serde(default = "default_tilt")]
    pub tilt: f64,
    /// System losses (%)
    #[serde(default = "default_losses")]
    pub losses: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_s: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Most recent calculations kept in memory
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port(), static_dir: default_static_dir() }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self { mapbox_token: None, base_url: default_mapbox_url(), country: default_country() }
    }
}

impl Default for PvWattsConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_pvwatts_url(),
            tilt: default_tilt(),
            losses: default_losses(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_s: default_timeout() }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: default_history_limit() }
    }
}

impl GeocodingConfig {
    /// Token if one is set and is not the template placeholder.
    pub fn token(&self) -> Option<&str> {
        self.mapbox_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != "your_mapbox_token_here")
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config.with_env_overrides())
    }

    /// Load `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default().with_env_overrides())
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var("MAPBOX_TOKEN") {
            self.geocoding.mapbox_token = Some(token);
        }
        if let Ok(key) = std::env::var("NREL_API_KEY") {
            self.pvwatts.api_key = key;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.offline_mode);
        assert_eq!(config.geocoding.country, "IN");
        assert_eq!(config.pvwatts.api_key, "DEMO_KEY");
        assert_eq!(config.pvwatts.tilt, 20.0);
        assert_eq!(config.history.limit, 20);
    }

    #[test]
    fn partial_sections_are_filled_in() {
        let config: Config = serde_json::from_str(
            r#"{ "server": { "port": 9000 }, "pvwatts": { "tilt": 12.5 }, "offline_mode": true }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.pvwatts.tilt, 12.5);
        assert_eq!(config.pvwatts.losses, 14.0);
        assert!(config.offline_mode);
    }

    #[test]
    fn placeholder_token_is_ignored() {
        let mut geocoding = GeocodingConfig::default();
        assert_eq!(geocoding.token(), None);
        geocoding.mapbox_token = Some("your_mapbox_token_here".to_string());
        assert_eq!(geocoding.token(), None);
        geocoding.mapbox_token = Some("pk.abc".to_string());
        assert_eq!(geocoding.token(), Some("pk.abc"));
    }
}
