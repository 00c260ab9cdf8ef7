//! Type definitions for the AgroTrack Dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned record identifier.
///
/// The backend owns the id format; the dashboard only displays and compares it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One telemetry reading as returned by `GET /api/v1/telemetry`.
///
/// Every column but the id is nullable in the backend store and records are
/// written without validation, so each reading may be missing or out of range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub id: RecordId,
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub engine_rpm: Option<i64>,
    #[serde(default)]
    pub fuel_level: Option<f64>,
    #[serde(default)]
    pub soil_moisture: Option<f64>,
}

/// Creation payload for `POST /api/v1/telemetry`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTelemetry {
    pub equipment_id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub engine_rpm: u32,
    pub fuel_level: f64,
    pub soil_moisture: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_decodes_without_optional_metrics() {
        let json = r#"[{"id":1,"equipmentId":"t1","timestamp":"2024-05-01T10:00:00Z","latitude":41.1,"longitude":-87.6,"engineRpm":2000}]"#;
        let records: Vec<TelemetryRecord> = serde_json::from_str(json).expect("valid payload");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, RecordId::Number(1));
        assert_eq!(record.equipment_id.as_deref(), Some("t1"));
        assert_eq!(record.timestamp, Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()));
        assert_eq!(record.engine_rpm, Some(2000));
        assert_eq!(record.fuel_level, None);
        assert_eq!(record.soil_moisture, None);
    }

    #[test]
    fn test_record_accepts_null_metrics_and_string_ids() {
        let json = r#"{"id":"a-17","equipmentId":"combine","timestamp":"2024-05-01T10:00:00.250+02:00","latitude":0.0,"longitude":0.0,"engineRpm":0,"fuelLevel":null,"soilMoisture":31.5}"#;
        let record: TelemetryRecord = serde_json::from_str(json).expect("valid payload");

        assert_eq!(record.id, RecordId::Text("a-17".to_string()));
        assert_eq!(record.id.to_string(), "a-17");
        assert_eq!(record.fuel_level, None);
        assert_eq!(record.soil_moisture, Some(31.5));
        assert_eq!(
            record.timestamp.map(|ts| ts.to_rfc3339()).as_deref(),
            Some("2024-05-01T08:00:00.250+00:00")
        );
    }

    #[test]
    fn test_record_tolerates_null_and_out_of_range_readings() {
        let json = r#"{"id":3,"equipmentId":null,"timestamp":null,"latitude":123.4,"engineRpm":-5}"#;
        let record: TelemetryRecord = serde_json::from_str(json).expect("lenient payload");

        assert_eq!(record.equipment_id, None);
        assert_eq!(record.timestamp, None);
        assert_eq!(record.latitude, Some(123.4));
        assert_eq!(record.longitude, None);
        assert_eq!(record.engine_rpm, Some(-5));
    }

    #[test]
    fn test_new_telemetry_uses_camel_case_keys() {
        let payload = NewTelemetry {
            equipment_id: "tractor-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            latitude: 41.1,
            longitude: -87.6,
            engine_rpm: 1800,
            fuel_level: 55.0,
            soil_moisture: 22.5,
        };

        let value = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(value["equipmentId"], "tractor-7");
        assert_eq!(value["timestamp"], "2024-05-01T10:00:00Z");
        assert_eq!(value["engineRpm"], 1800);
        assert_eq!(value["fuelLevel"], 55.0);
        assert_eq!(value["soilMoisture"], 22.5);
        assert!(value.get("id").is_none());
    }
}
