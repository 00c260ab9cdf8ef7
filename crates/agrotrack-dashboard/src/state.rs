//! Application state shared by every page

use std::rc::Rc;

use leptos::*;

use crate::api::TelemetryClient;
use crate::config::AppConfig;

/// Global application state, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: Rc<TelemetryClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let api = Rc::new(TelemetryClient::with_base_url(&config.api_base_url));
        Self { config, api }
    }
}

/// Provide application state context
pub fn provide_app_state(config: AppConfig) -> AppState {
    let state = AppState::new(config);
    provide_context(state.clone());
    state
}

/// Use application state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TELEMETRY_PATH;
    use crate::config::RunMode;

    #[test]
    fn test_client_follows_configured_backend() {
        let config = AppConfig::resolve(RunMode::Production, Some("https://farm.example.com/"));
        let state = AppState::new(config);

        assert_eq!(state.config.api_base_url, "https://farm.example.com");
        assert_eq!(
            state.api.telemetry_url(),
            format!("{}{}", state.config.api_base_url, TELEMETRY_PATH)
        );
    }
}
