//! AgroTrack Dashboard - Leptos Web Interface
//!
//! A single-page dashboard for agricultural equipment telemetry: a record
//! table, an engine RPM chart, an equipment map and a form for new records.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod map;
pub mod pages;
pub mod state;
pub mod types;
pub mod view;

use leptos::*;

use config::{AppConfig, RunMode};
use pages::Dashboard;
use state::provide_app_state;

/// Main application component
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Initialize app state
    provide_app_state(config);

    view! {
        <main>
            <Dashboard />
        </main>
    }
}

/// Mount the application to the DOM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(RunMode::current().log_level());

    map::init_marker_icons();

    let config = AppConfig::from_environment();
    log::info!("telemetry dashboard starting, backend at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}
