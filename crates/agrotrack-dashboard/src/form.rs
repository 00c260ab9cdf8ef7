//! Record submission form: raw field state, validation and coercion

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::ValidationError;
use crate::types::NewTelemetry;

/// Accepted shapes of a `datetime-local` input value.
const LOCAL_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Editable fields of a telemetry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    EquipmentId,
    Timestamp,
    Latitude,
    Longitude,
    EngineRpm,
    FuelLevel,
    SoilMoisture,
}

impl FormField {
    /// Fields in display order.
    pub const ALL: [FormField; 7] = [
        FormField::EquipmentId,
        FormField::Timestamp,
        FormField::Latitude,
        FormField::Longitude,
        FormField::EngineRpm,
        FormField::FuelLevel,
        FormField::SoilMoisture,
    ];

    /// Field name, matching the JSON key of the record.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::EquipmentId => "equipmentId",
            FormField::Timestamp => "timestamp",
            FormField::Latitude => "latitude",
            FormField::Longitude => "longitude",
            FormField::EngineRpm => "engineRpm",
            FormField::FuelLevel => "fuelLevel",
            FormField::SoilMoisture => "soilMoisture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::EquipmentId => "Equipment ID",
            FormField::Timestamp => "Timestamp",
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
            FormField::EngineRpm => "Engine RPM",
            FormField::FuelLevel => "Fuel level",
            FormField::SoilMoisture => "Soil moisture",
        }
    }

    /// HTML input type used to edit the field.
    pub fn input_type(&self) -> &'static str {
        match self {
            FormField::EquipmentId => "text",
            FormField::Timestamp => "datetime-local",
            _ => "number",
        }
    }

    /// HTML `step` attribute for numeric inputs.
    pub fn step(&self) -> Option<&'static str> {
        match self {
            FormField::EquipmentId | FormField::Timestamp => None,
            FormField::EngineRpm => Some("1"),
            _ => Some("any"),
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown form field: {}", s))
    }
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub equipment_id: String,
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
    pub engine_rpm: String,
    pub fuel_level: String,
    pub soil_moisture: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::EquipmentId => &self.equipment_id,
            FormField::Timestamp => &self.timestamp,
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::EngineRpm => &self.engine_rpm,
            FormField::FuelLevel => &self.fuel_level,
            FormField::SoilMoisture => &self.soil_moisture,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::EquipmentId => &mut self.equipment_id,
            FormField::Timestamp => &mut self.timestamp,
            FormField::Latitude => &mut self.latitude,
            FormField::Longitude => &mut self.longitude,
            FormField::EngineRpm => &mut self.engine_rpm,
            FormField::FuelLevel => &mut self.fuel_level,
            FormField::SoilMoisture => &mut self.soil_moisture,
        }
    }

    /// Replace the raw value of one field. Other fields are untouched.
    pub fn on_field_change(&mut self, field: FormField, raw: impl Into<String>) {
        *self.slot_mut(field) = raw.into();
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = FormState::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == FormState::default()
    }

    /// Validate the raw input and coerce it into a creation payload.
    ///
    /// `tz` is the zone the timestamp input was entered in.
    pub fn to_payload<Tz: TimeZone>(&self, tz: &Tz) -> Result<NewTelemetry, ValidationError> {
        let fuel_level = parse_finite(FormField::FuelLevel, &self.fuel_level)?;
        if !(0.0..=100.0).contains(&fuel_level) {
            return Err(ValidationError::FuelLevelOutOfRange);
        }
        let engine_rpm = parse_rpm(&self.engine_rpm)?;

        let equipment_id = self.equipment_id.trim();
        if equipment_id.is_empty() {
            return Err(ValidationError::MissingField(FormField::EquipmentId));
        }
        let timestamp = parse_local_timestamp(&self.timestamp, tz)?;

        let latitude = parse_finite(FormField::Latitude, &self.latitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange);
        }
        let longitude = parse_finite(FormField::Longitude, &self.longitude)?;
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange);
        }
        let soil_moisture = parse_finite(FormField::SoilMoisture, &self.soil_moisture)?;

        Ok(NewTelemetry {
            equipment_id: equipment_id.to_string(),
            timestamp,
            latitude,
            longitude,
            engine_rpm,
            fuel_level,
            soil_moisture,
        })
    }
}

fn parse_finite(field: FormField, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    // `f64::from_str` accepts "NaN" and "inf"; neither may reach the payload.
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

fn parse_rpm(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(FormField::EngineRpm));
    }
    let value: i64 = match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            return match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v < 0.0 => Err(ValidationError::NegativeEngineRpm),
                _ => Err(ValidationError::NotAnInteger(FormField::EngineRpm)),
            };
        }
    };
    if value < 0 {
        return Err(ValidationError::NegativeEngineRpm);
    }
    u32::try_from(value).map_err(|_| ValidationError::NotAnInteger(FormField::EngineRpm))
}

fn parse_local_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(FormField::Timestamp));
    }
    let naive = LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or(ValidationError::InvalidTimestamp)?;

    // A wall-clock time skipped by a DST transition has no instant.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or(ValidationError::InvalidTimestamp)
}
