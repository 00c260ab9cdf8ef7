//! API client for the AgroTrack Dashboard
//!
//! Talks to the telemetry backend over `{base}/api/v1/telemetry`.

use std::cell::{Cell, RefCell};

use gloo_net::http::Request;

use crate::error::{NetworkError, SubmissionError};
use crate::types::{NewTelemetry, RecordId, TelemetryRecord};

/// Path of the telemetry collection, relative to the base URL.
pub const TELEMETRY_PATH: &str = "/api/v1/telemetry";

// =============================================================================
// Telemetry API Trait
// =============================================================================

/// Backend operations the dashboard depends on.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[allow(async_fn_in_trait)]
pub trait TelemetryApi {
    /// Fetch every record, in backend order.
    async fn list_telemetry(&self) -> Result<Vec<TelemetryRecord>, NetworkError>;

    /// Create one record. The response body is not inspected beyond its status.
    async fn create_telemetry(&self, record: &NewTelemetry) -> Result<(), SubmissionError>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// gloo-net client for the telemetry backend.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    base_url: String,
}

impl TelemetryClient {
    /// Create a client rooted at `base_url` (no trailing slash).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn telemetry_url(&self) -> String {
        format!("{}{}", self.base_url, TELEMETRY_PATH)
    }
}

/// Decode a list response one record at a time.
///
/// The body must be a JSON array. Elements that are not a record at all are
/// skipped with a warning so one bad row cannot hide the rest.
pub fn decode_records(body: &str) -> Result<Vec<TelemetryRecord>, NetworkError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| NetworkError::Decode(e.to_string()))?;

    let total = rows.len();
    let records: Vec<TelemetryRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("skipping undecodable telemetry record #{}: {}", index, err);
                None
            }
        })
        .collect();

    if records.len() < total {
        log::warn!("decoded {} of {} telemetry records", records.len(), total);
    }
    Ok(records)
}

impl TelemetryApi for TelemetryClient {
    async fn list_telemetry(&self) -> Result<Vec<TelemetryRecord>, NetworkError> {
        let url = self.telemetry_url();
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;
        decode_records(&body)
    }

    async fn create_telemetry(&self, record: &NewTelemetry) -> Result<(), SubmissionError> {
        let url = self.telemetry_url();
        let response = Request::post(&url)
            .json(record)
            .map_err(|e| SubmissionError::transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmissionError::transport(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SubmissionError::from_response(status, &body));
        }

        Ok(())
    }
}

// =============================================================================
// In-Memory API (for testing)
// =============================================================================

/// In-memory backend for testing. Counts calls and can be told to fail.
#[derive(Debug, Default)]
pub struct InMemoryTelemetryApi {
    records: RefCell<Vec<TelemetryRecord>>,
    submitted: RefCell<Vec<NewTelemetry>>,
    list_failure: RefCell<Option<NetworkError>>,
    create_failure: RefCell<Option<SubmissionError>>,
    list_calls: Cell<usize>,
    create_calls: Cell<usize>,
}

impl InMemoryTelemetryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given records stored.
    pub fn with_records(records: Vec<TelemetryRecord>) -> Self {
        let api = Self::new();
        *api.records.borrow_mut() = records;
        api
    }

    /// Make every list call fail with `error` until cleared.
    pub fn fail_list(&self, error: Option<NetworkError>) {
        *self.list_failure.borrow_mut() = error;
    }

    /// Make every create call fail with `error` until cleared.
    pub fn fail_create(&self, error: Option<SubmissionError>) {
        *self.create_failure.borrow_mut() = error;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    /// Payloads accepted by `create_telemetry`, oldest first.
    pub fn submitted(&self) -> Vec<NewTelemetry> {
        self.submitted.borrow().clone()
    }

    fn next_id(&self) -> RecordId {
        let max = self
            .records
            .borrow()
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        RecordId::Number(max + 1)
    }
}

impl TelemetryApi for InMemoryTelemetryApi {
    async fn list_telemetry(&self) -> Result<Vec<TelemetryRecord>, NetworkError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(err) = self.list_failure.borrow().clone() {
            return Err(err);
        }
        Ok(self.records.borrow().clone())
    }

    async fn create_telemetry(&self, record: &NewTelemetry) -> Result<(), SubmissionError> {
        self.create_calls.set(self.create_calls.get() + 1);
        if let Some(err) = self.create_failure.borrow().clone() {
            return Err(err);
        }

        let stored = TelemetryRecord {
            id: self.next_id(),
            equipment_id: Some(record.equipment_id.clone()),
            timestamp: Some(record.timestamp),
            latitude: Some(record.latitude),
            longitude: Some(record.longitude),
            engine_rpm: Some(i64::from(record.engine_rpm)),
            fuel_level: Some(record.fuel_level),
            soil_moisture: Some(record.soil_moisture),
        };
        self.records.borrow_mut().push(stored);
        self.submitted.borrow_mut().push(record.clone());
        Ok(())
    }
}
