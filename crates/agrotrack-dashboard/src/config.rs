//! Dashboard configuration
//!
//! The API base URL is resolved once at startup and handed to the component
//! tree through [`crate::state::AppState`].

use web_sys::window;

/// Backend address used outside production builds.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Attribute on the document root carrying a deployment-supplied base URL.
pub const API_BASE_URL_ATTRIBUTE: &str = "data-api-url";

/// Build-time override for production deployments.
const DEPLOYED_API_BASE_URL: Option<&str> = option_env!("AGROTRACK_API_URL");

/// Build flavour the dashboard runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
}

impl RunMode {
    /// Release builds are production; everything else is development.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            RunMode::Development
        } else {
            RunMode::Production
        }
    }

    pub fn log_level(&self) -> log::Level {
        match self {
            RunMode::Production => log::Level::Info,
            RunMode::Development => log::Level::Debug,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// Resolve the configuration for `mode`.
    ///
    /// `deployed` is only consulted in production. Blank values count as absent.
    pub fn resolve(mode: RunMode, deployed: Option<&str>) -> Self {
        let api_base_url = match mode {
            RunMode::Development => DEFAULT_API_BASE_URL.to_string(),
            RunMode::Production => match deployed.map(str::trim).filter(|url| !url.is_empty()) {
                Some(url) => url.to_string(),
                None => {
                    log::warn!(
                        "no deployment API URL configured, falling back to {}",
                        DEFAULT_API_BASE_URL
                    );
                    DEFAULT_API_BASE_URL.to_string()
                }
            },
        };

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve from the build mode and the hosting page.
    pub fn from_environment() -> Self {
        let mode = RunMode::current();
        let deployed = DEPLOYED_API_BASE_URL
            .map(str::to_string)
            .or_else(document_api_base_url);
        Self::resolve(mode, deployed.as_deref())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(RunMode::Development, None)
    }
}

/// Read the base URL attribute from the document root element, if any.
fn document_api_base_url() -> Option<String> {
    window()?
        .document()?
        .document_element()?
        .get_attribute(API_BASE_URL_ATTRIBUTE)
        .filter(|url| !url.trim().is_empty())
}
