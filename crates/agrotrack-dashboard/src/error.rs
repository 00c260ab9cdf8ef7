//! Dashboard error types
//!
//! Every failure ends up as user-visible state: load failures replace the view
//! (or show a notice over stale data), validation and submission failures show
//! inline above the form. None of them are fatal.

use thiserror::Error;

use crate::form::FormField;

/// Message shown when the record list cannot be loaded. The detailed cause is
/// only logged.
pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load telemetry data. Make sure the backend server is running.";

// =============================================================================
// Network Error
// =============================================================================

/// Failure while loading the record list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl NetworkError {
    /// Generic, human-readable text for the error view.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Client-side rejection of form input. Raised before any network call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(FormField),

    #[error("{0} must be a number")]
    NotANumber(FormField),

    #[error("{0} must be a whole number")]
    NotAnInteger(FormField),

    #[error("Fuel level must be between 0 and 100")]
    FuelLevelOutOfRange,

    #[error("Engine RPM cannot be negative")]
    NegativeEngineRpm,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,

    #[error("Timestamp must be a valid date and time")]
    InvalidTimestamp,
}

// =============================================================================
// Submission Error
// =============================================================================

/// The backend refused a new record, or the request never reached it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct SubmissionError {
    pub status: Option<u16>,
    pub message: String,
}

impl SubmissionError {
    /// Build an error from a non-success response.
    ///
    /// Prefers a `message` or `error` field of a JSON object body, then the raw
    /// body text, then a status-only fallback.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"].iter().find_map(|key| {
                    value
                        .get(key)
                        .and_then(|v| v.as_str())
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
            });

        let message = match from_json {
            Some(message) => message,
            None if !body.is_empty() => body.to_string(),
            None => format!("Server returned status {}", status),
        };

        Self {
            status: Some(status),
            message,
        }
    }

    /// The request failed before a response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

// =============================================================================
// Form Error
// =============================================================================

/// Error banner state for the submission form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_hides_detail_from_user() {
        let err = NetworkError::Status {
            status: 503,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "server returned status 503: upstream down");
        assert_eq!(err.user_message(), LOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_submission_error_prefers_json_message() {
        let err = SubmissionError::from_response(400, r#"{"status":400,"message":"equipmentId too long"}"#);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "equipmentId too long");

        let err = SubmissionError::from_response(500, r#"{"status":500,"error":"Internal Server Error","message":""}"#);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[test]
    fn test_submission_error_falls_back_to_text_then_status() {
        let err = SubmissionError::from_response(422, "  fuel level rejected \n");
        assert_eq!(err.message, "fuel level rejected");

        let err = SubmissionError::from_response(502, "   ");
        assert_eq!(err.message, "Server returned status 502");

        let err = SubmissionError::from_response(400, "[1, 2]");
        assert_eq!(err.message, "[1, 2]");
    }

    #[test]
    fn test_validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::MissingField(FormField::EquipmentId).to_string(),
            "Equipment ID is required"
        );
        assert_eq!(
            ValidationError::NotANumber(FormField::SoilMoisture).to_string(),
            "Soil moisture must be a number"
        );
        assert_eq!(
            FormError::from(ValidationError::FuelLevelOutOfRange).to_string(),
            "Fuel level must be between 0 and 100"
        );
    }
}
