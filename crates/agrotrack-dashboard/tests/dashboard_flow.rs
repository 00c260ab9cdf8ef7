//! End-to-end tests for the dashboard load and submit flows
//!
//! Drives the page actions against an in-memory backend and checks the view
//! the dashboard would render.

use chrono::Utc;
use leptos::create_runtime;
use leptos::SignalGetUntracked;
use leptos::SignalUpdate;
use leptos::SignalWithUntracked;
use serde_json::{json, Value};

use agrotrack_dashboard::api::{decode_records, InMemoryTelemetryApi};
use agrotrack_dashboard::error::SubmissionError;
use agrotrack_dashboard::form::FormField;
use agrotrack_dashboard::pages::{load_records, submit_record, DashboardContext};
use agrotrack_dashboard::view::{ChartPoint, DashboardView, MapMarker};

/// Backend seeded from a JSON response body, as the REST endpoint would send it.
fn backend(body: Value) -> InMemoryTelemetryApi {
    let records = decode_records(&body.to_string()).unwrap();
    InMemoryTelemetryApi::with_records(records)
}

fn render(ctx: &DashboardContext) -> DashboardView {
    ctx.records.with_untracked(|records| {
        ctx.load_error.with_untracked(|error| {
            DashboardView::derive(records.as_deref(), error.as_deref(), &Utc)
        })
    })
}

#[tokio::test]
async fn test_single_record_renders_everywhere() {
    let runtime = create_runtime();
    let ctx = DashboardContext::new();
    let api = backend(json!([{
        "id": 1,
        "equipmentId": "t1",
        "timestamp": "2024-05-01T10:00:00Z",
        "latitude": 41.1,
        "longitude": -87.6,
        "engineRpm": 2000
    }]));

    assert_eq!(render(&ctx), DashboardView::Loading);
    load_records(&api, &ctx).await;

    let DashboardView::Populated { table, chart, map, notice } = render(&ctx) else {
        panic!("expected populated dashboard");
    };
    assert_eq!(notice, None);

    assert_eq!(table.len(), 1);
    assert_eq!(table[0].id, "1");
    assert_eq!(table[0].equipment_id.as_deref(), Some("t1"));
    assert_eq!(table[0].latitude, Some(41.1));
    assert_eq!(table[0].longitude, Some(-87.6));
    assert_eq!(table[0].engine_rpm, Some(2000));

    assert_eq!(chart.points, vec![ChartPoint { label: "10:00:00".to_string(), value: 2000 }]);

    assert_eq!(map.center, (41.1, -87.6));
    assert_eq!(
        map.markers,
        vec![MapMarker { latitude: 41.1, longitude: -87.6, label: "t1".to_string() }]
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_null_readings_do_not_hide_valid_rows() {
    let runtime = create_runtime();
    let ctx = DashboardContext::new();
    let api = backend(json!([
        {"id": 1, "equipmentId": "t1", "timestamp": "2024-05-01T10:00:00Z",
         "latitude": 41.1, "longitude": -87.6, "engineRpm": 2000},
        {"id": 2, "equipmentId": "t2", "timestamp": "2024-05-01T10:05:00Z",
         "latitude": 41.2, "longitude": -87.5, "engineRpm": null},
        {"id": 3, "equipmentId": null, "timestamp": null,
         "latitude": null, "longitude": null, "engineRpm": -5}
    ]));

    load_records(&api, &ctx).await;

    let DashboardView::Populated { table, chart, map, notice } = render(&ctx) else {
        panic!("expected populated dashboard");
    };
    assert_eq!(notice, None);
    assert_eq!(table.len(), 3);
    assert_eq!(table[1].engine_rpm, None);
    assert_eq!(table[2].equipment_id, None);

    let values: Vec<i64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![2000, -5]);

    let labels: Vec<&str> = map.markers.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["t1", "t2"]);

    runtime.dispose();
}

#[tokio::test]
async fn test_empty_backend_then_first_submission() {
    let runtime = create_runtime();
    let ctx = DashboardContext::new();
    let api = backend(json!([]));

    load_records(&api, &ctx).await;
    assert_eq!(render(&ctx), DashboardView::Empty { notice: None });

    ctx.form.update(|form| {
        form.on_field_change(FormField::EquipmentId, "  harvester-2 ");
        form.on_field_change(FormField::Timestamp, "2024-05-01T10:00");
        form.on_field_change(FormField::Latitude, "41.5");
        form.on_field_change(FormField::Longitude, "-87.9");
        form.on_field_change(FormField::EngineRpm, "1800");
        form.on_field_change(FormField::FuelLevel, "75.5");
        form.on_field_change(FormField::SoilMoisture, "22");
    });
    submit_record(&api, &ctx).await;

    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.list_calls(), 2);
    assert!(ctx.form.get_untracked().is_empty());

    let sent = api.submitted();
    assert_eq!(sent[0].equipment_id, "harvester-2");
    assert_eq!(sent[0].fuel_level, 75.5);

    let view = render(&ctx);
    assert_eq!(view.table_row_count(), 1);

    runtime.dispose();
}

#[tokio::test]
async fn test_backend_rejection_is_shown_and_form_kept() {
    let runtime = create_runtime();
    let ctx = DashboardContext::new();
    let api = backend(json!([]));
    api.fail_create(Some(SubmissionError::from_response(
        422,
        r#"{"message": "timestamp is in the future"}"#,
    )));

    load_records(&api, &ctx).await;
    ctx.form.update(|form| {
        form.on_field_change(FormField::EquipmentId, "t9");
        form.on_field_change(FormField::Timestamp, "2024-05-01T10:00");
        form.on_field_change(FormField::Latitude, "0");
        form.on_field_change(FormField::Longitude, "0");
        form.on_field_change(FormField::EngineRpm, "0");
        form.on_field_change(FormField::FuelLevel, "0");
        form.on_field_change(FormField::SoilMoisture, "0");
    });
    let typed = ctx.form.get_untracked();
    submit_record(&api, &ctx).await;

    assert_eq!(ctx.form.get_untracked(), typed);
    let banner = ctx.form_error.get_untracked().map(|err| err.to_string());
    assert_eq!(banner.as_deref(), Some("timestamp is in the future"));
    assert_eq!(api.list_calls(), 1);

    runtime.dispose();
}
