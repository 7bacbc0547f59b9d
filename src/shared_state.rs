use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::models::api::CalculationResponse;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Shared client for geocoding and PVWatts lookups
    pub client: Client,
    /// Offline mode flag — toggled at runtime via API
    pub offline_mode: Arc<AtomicBool>,
    /// Append-only log of past calculations, oldest first, bounded by
    /// `config.history.limit`
    history: Arc<RwLock<VecDeque<CalculationResponse>>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_s))
            .user_agent(concat!("solar-roi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let offline = config.offline_mode;
        Ok(Self {
            config: Arc::new(config),
            client,
            offline_mode: Arc::new(AtomicBool::new(offline)),
            history: Arc::new(RwLock::new(VecDeque::new())),
        })
    }

    pub fn is_offline(&self) -> bool {
        self.offline_mode.load(Ordering::Relaxed)
    }

    pub fn set_offline(&self, value: bool) {
        self.offline_mode.store(value, Ordering::Relaxed);
    }

    pub fn record(&self, entry: CalculationResponse) {
        let limit = self.config.history.limit;
        if limit == 0 {
            return;
        }
        if let Ok(mut log) = self.history.write() {
            while log.len() >= limit {
                log.pop_front();
            }
            log.push_back(entry);
        }
    }

    /// Past calculations, newest first.
    pub fn history(&self) -> Vec<CalculationResponse> {
        if let Ok(log) = self.history.read() {
            log.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn clear_history(&self) {
        if let Ok(mut log) = self.history.write() {
            log.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::api::DataSource;
    use crate::models::roi::RawFormInput;
    use crate::services::roi_calculator;

    fn entry(place: &str) -> CalculationResponse {
        let input = RawFormInput::new(place, "1200", "3000");
        let result = roi_calculator::calculate(&input, None, None).unwrap();
        CalculationResponse {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input,
            place_name: place.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            region: None,
            data_source: DataSource::Fallback,
            result,
        }
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut config = Config::default();
        config.history.limit = 2;
        let state = AppState::new(config).unwrap();

        state.record(entry("Pune"));
        state.record(entry("Surat"));
        state.record(entry("Jaipur"));

        let places: Vec<String> = state.history().into_iter().map(|e| e.place_name).collect();
        assert_eq!(places, vec!["Jaipur", "Surat"]);

        state.clear_history();
        assert!(state.history().is_empty());
    }

    #[test]
    fn offline_flag_follows_config_and_toggles() {
        let config = Config { offline_mode: true, ..Default::default() };
        let state = AppState::new(config).unwrap();
        assert!(state.is_offline());
        state.set_offline(false);
        assert!(!state.is_offline());
    }
}
