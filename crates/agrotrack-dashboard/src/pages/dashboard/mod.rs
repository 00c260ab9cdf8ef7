//! Dashboard module - telemetry table, chart, map and submission form

pub mod actions;
pub mod chart;
pub mod equipment_map;
pub mod record_form;
pub mod state;
pub mod table;

pub use chart::RpmChart;
pub use equipment_map::EquipmentMap;
pub use record_form::RecordForm;
pub use state::{provide_dashboard_context, DashboardContext};
pub use table::TelemetryTable;

use chrono::Local;
use leptos::*;

use crate::state::use_app_state;
use crate::view::DashboardView;
use actions::{load_records, submit_record};

/// Main dashboard component
#[component]
pub fn Dashboard() -> impl IntoView {
    let app_state = use_app_state();

    // Provide dashboard context to all child components
    let ctx = provide_dashboard_context();

    // In-flight requests must not write to a disposed dashboard
    on_cleanup({
        let guard = ctx.guard.clone();
        move || guard.unmount()
    });

    let load_data = create_action({
        let api = app_state.api.clone();
        let ctx = ctx.clone();
        move |_: &()| {
            let api = api.clone();
            let ctx = ctx.clone();
            async move { load_records(api.as_ref(), &ctx).await }
        }
    });

    let submit = create_action({
        let api = app_state.api.clone();
        let ctx = ctx.clone();
        move |_: &()| {
            let api = api.clone();
            let ctx = ctx.clone();
            async move { submit_record(api.as_ref(), &ctx).await }
        }
    });

    // Load data on mount
    create_effect(move |_| {
        load_data.dispatch(());
    });

    let dashboard_view = create_memo(move |_| {
        ctx.records.with(|records| {
            ctx.load_error.with(|error| {
                DashboardView::derive(records.as_deref(), error.as_deref(), &Local)
            })
        })
    });

    let has_loaded = create_memo(move |_| dashboard_view.with(DashboardView::has_loaded));
    let backend_url = app_state.config.api_base_url.clone();

    view! {
        <div class="container">
            <header class="content-header">
                <h1>"Telemetry Dashboard"</h1>
                <div class="header-actions">
                    <span class="backend-url" title="Telemetry backend">{backend_url}</span>
                    <button
                        class="refresh-btn"
                        on:click=move |_| load_data.dispatch(())
                        disabled=move || ctx.refreshing.get()
                    >
                        {move || if ctx.refreshing.get() { "Refreshing..." } else { "Refresh" }}
                    </button>
                </div>
            </header>

            {move || dashboard_view.with(|current| current.notice().map(str::to_string)).map(|message| view! {
                <div class="notice error">{message}</div>
            })}

            // Stays mounted across refreshes
            <Show when=move || has_loaded.get()>
                <RecordForm submit=submit/>
            </Show>

            {move || match dashboard_view.get() {
                DashboardView::Loading => view! {
                    <div class="loading">"Loading telemetry data..."</div>
                }.into_view(),
                DashboardView::Error { message } => view! {
                    <div class="error">
                        <p>{message}</p>
                        <button class="retry-btn" on:click=move |_| load_data.dispatch(())>"Retry"</button>
                    </div>
                }.into_view(),
                DashboardView::Empty { .. } => view! {
                    <p class="empty-state">"No telemetry data available. Add a record using the form above."</p>
                }.into_view(),
                DashboardView::Populated { table, chart, map, .. } => view! {
                    <TelemetryTable rows=table/>
                    <RpmChart series=chart/>
                    <EquipmentMap map_view=map/>
                }.into_view(),
            }}
        </div>
    }
}
