//! Load and submit flows behind the dashboard actions

use chrono::Local;
use leptos::*;

use crate::api::TelemetryApi;
use crate::form::FormState;
use super::state::DashboardContext;

/// Fetch the record list and replace the current snapshot.
///
/// Results of superseded loads, and of loads finishing after unmount, are
/// dropped without touching any signal.
pub async fn load_records<A: TelemetryApi>(api: &A, ctx: &DashboardContext) {
    let ticket = ctx.guard.begin();
    ctx.refreshing.set(true);

    let result = api.list_telemetry().await;

    if !ctx.guard.is_current(ticket) {
        log::debug!("discarding stale telemetry load #{}", ticket);
        return;
    }
    ctx.refreshing.set(false);

    match result {
        Ok(records) => {
            log::info!("loaded {} telemetry records", records.len());
            ctx.records.set(Some(records));
            ctx.load_error.set(None);
        }
        Err(err) => {
            log::error!("Error fetching telemetry data: {}", err);
            ctx.load_error.set(Some(err.user_message().to_string()));
        }
    }
}

/// Validate the form, send it, and reload on success.
///
/// Invalid input never reaches the network. A rejected submission keeps the
/// form as typed so it can be corrected.
pub async fn submit_record<A: TelemetryApi>(api: &A, ctx: &DashboardContext) {
    if ctx.submitting.get_untracked() {
        log::debug!("ignoring submit while another submission is in flight");
        return;
    }

    let payload = match ctx.form.with_untracked(|form| form.to_payload(&Local)) {
        Ok(payload) => payload,
        Err(err) => {
            log::debug!("telemetry form rejected: {}", err);
            ctx.form_error.set(Some(err.into()));
            return;
        }
    };

    ctx.form_error.set(None);
    ctx.submitting.set(true);

    let result = api.create_telemetry(&payload).await;

    if !ctx.guard.is_mounted() {
        return;
    }
    ctx.submitting.set(false);

    match result {
        Ok(()) => {
            log::info!("created telemetry record for {}", payload.equipment_id);
            ctx.form.update(FormState::reset);
            load_records(api, ctx).await;
        }
        Err(err) => {
            log::warn!("telemetry submission rejected: {}", err);
            ctx.form_error.set(Some(err.into()));
        }
    }
}
