use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ValidationError;
use crate::flight::{FlightInput, FlightStatus, FlightType};
use crate::time::parse_timestamp;

/// Outcome of validating a candidate: one message per violated field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    /// Message recorded for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    fn record(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.errors.insert(e.field(), e.to_string());
        }
    }
}

/// Validator for flight payloads.
pub struct Validator;

impl Validator {
    /// Validate flight number.
    /// Must be non-empty after trimming and contain only `A-Z` and `0-9`.
    pub fn validate_flight_number(value: Option<&str>) -> Result<(), ValidationError> {
        let value = non_blank(value).ok_or(ValidationError::FlightNumberRequired)?;
        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::FlightNumberFormat);
        }
        Ok(())
    }

    pub fn validate_airline(value: Option<&str>) -> Result<(), ValidationError> {
        non_blank(value).ok_or(ValidationError::AirlineRequired)?;
        Ok(())
    }

    /// Validate flight type. Exact match, no trimming.
    pub fn validate_type(value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(v) if FlightType::ALL.iter().any(|t| t.as_str() == v) => Ok(()),
            _ => Err(ValidationError::InvalidType),
        }
    }

    pub fn validate_origin(value: Option<&str>) -> Result<(), ValidationError> {
        let value = non_blank(value).ok_or(ValidationError::OriginRequired)?;
        if value.chars().count() != 3 {
            return Err(ValidationError::OriginLength);
        }
        Ok(())
    }

    pub fn validate_destination(value: Option<&str>) -> Result<(), ValidationError> {
        let value = non_blank(value).ok_or(ValidationError::DestinationRequired)?;
        if value.chars().count() != 3 {
            return Err(ValidationError::DestinationLength);
        }
        Ok(())
    }

    /// Validate scheduled time. An empty string counts as missing.
    pub fn validate_scheduled_time(value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            None | Some("") => Err(ValidationError::ScheduledTimeRequired),
            Some(v) if parse_timestamp(v).is_none() => Err(ValidationError::ScheduledTimeInvalid),
            Some(_) => Ok(()),
        }
    }

    pub fn validate_status(value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(v) if FlightStatus::ALL.iter().any(|s| s.as_str() == v) => Ok(()),
            _ => Err(ValidationError::InvalidStatus),
        }
    }

    /// Validate a candidate flight.
    ///
    /// In `partial` mode a field is only checked when present in the
    /// candidate. Every rule runs; all violations are collected.
    pub fn validate_flight(candidate: &FlightInput, partial: bool) -> ValidationReport {
        type Rule = fn(Option<&str>) -> Result<(), ValidationError>;

        let checks: [(&Option<String>, Rule); 7] = [
            (&candidate.flight_number, Self::validate_flight_number),
            (&candidate.airline, Self::validate_airline),
            (&candidate.flight_type, Self::validate_type),
            (&candidate.origin, Self::validate_origin),
            (&candidate.destination, Self::validate_destination),
            (&candidate.scheduled_time, Self::validate_scheduled_time),
            (&candidate.status, Self::validate_status),
        ];

        let mut report = ValidationReport::default();
        for (value, rule) in checks {
            if partial && value.is_none() {
                continue;
            }
            report.record(rule(value.as_deref()));
        }
        report
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "flightNumber",
        "airline",
        "type",
        "origin",
        "destination",
        "scheduledTime",
        "status",
    ];

    fn valid_input() -> FlightInput {
        FlightInput {
            flight_number: Some("AA101".to_string()),
            airline: Some("American Airlines".to_string()),
            flight_type: Some("Departure".to_string()),
            origin: Some("JFK".to_string()),
            destination: Some("LAX".to_string()),
            scheduled_time: Some("2024-01-01T00:00:00Z".to_string()),
            gate: None,
            status: Some("On Time".to_string()),
        }
    }

    fn without(field: &str) -> FlightInput {
        let mut input = valid_input();
        match field {
            "flightNumber" => input.flight_number = None,
            "airline" => input.airline = None,
            "type" => input.flight_type = None,
            "origin" => input.origin = None,
            "destination" => input.destination = None,
            "scheduledTime" => input.scheduled_time = None,
            "status" => input.status = None,
            other => panic!("unknown field {}", other),
        }
        input
    }

    #[test]
    fn test_valid_flight() {
        let report = Validator::validate_flight(&valid_input(), false);
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_removing_one_field_reports_exactly_that_field() {
        for field in REQUIRED {
            let report = Validator::validate_flight(&without(field), false);
            assert!(!report.is_valid(), "{} should be required", field);
            assert_eq!(report.errors().len(), 1);
            assert!(report.error(field).is_some());
        }
    }

    #[test]
    fn test_empty_candidate_reports_every_required_field() {
        let report = Validator::validate_flight(&FlightInput::default(), false);
        assert_eq!(report.errors().len(), REQUIRED.len());
        assert_eq!(report.error("flightNumber"), Some("Flight Number is required"));
        assert_eq!(report.error("airline"), Some("Airline is required"));
        assert_eq!(
            report.error("type"),
            Some("Type must be one of: Departure, Arrival")
        );
        assert_eq!(report.error("origin"), Some("Origin is required"));
        assert_eq!(report.error("destination"), Some("Destination is required"));
        assert_eq!(
            report.error("scheduledTime"),
            Some("Scheduled Time is required")
        );
        assert!(report.error("gate").is_none());
    }

    #[test]
    fn test_partial_skips_absent_fields() {
        assert!(Validator::validate_flight(&FlightInput::default(), true).is_valid());

        let input = FlightInput {
            status: Some("Boarding".to_string()),
            ..Default::default()
        };
        assert!(Validator::validate_flight(&input, true).is_valid());
    }

    #[test]
    fn test_partial_reports_same_message_as_full() {
        let mut input = valid_input();
        input.origin = Some("JFKX".to_string());
        input.status = Some("Lost".to_string());
        let full = Validator::validate_flight(&input, false);

        let partial_input = FlightInput {
            origin: input.origin.clone(),
            status: input.status.clone(),
            ..Default::default()
        };
        let partial = Validator::validate_flight(&partial_input, true);

        assert_eq!(full, partial);
        assert_eq!(
            partial.error("origin"),
            Some("Origin must be 3 characters (IATA code)")
        );
    }

    #[test]
    fn test_flight_number_rules() {
        assert!(Validator::validate_flight_number(Some("AA101")).is_ok());
        assert!(Validator::validate_flight_number(Some("  BA2490 ")).is_ok());
        assert_eq!(
            Validator::validate_flight_number(Some("   ")),
            Err(ValidationError::FlightNumberRequired)
        );
        assert_eq!(
            Validator::validate_flight_number(Some("ab-1")),
            Err(ValidationError::FlightNumberFormat)
        );
        assert_eq!(
            Validator::validate_flight_number(Some("aa101")),
            Err(ValidationError::FlightNumberFormat)
        );
        assert_eq!(
            Validator::validate_flight_number(Some("AA 101")),
            Err(ValidationError::FlightNumberFormat)
        );
    }

    #[test]
    fn test_lowercase_hyphenated_flight_number_is_rejected() {
        let mut input = valid_input();
        input.flight_number = Some("ab-1".to_string());
        input.airline = Some("X".to_string());

        let report = Validator::validate_flight(&input, false);
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 1);
        assert_eq!(
            report.error("flightNumber"),
            Some("Flight Number must be alphanumeric")
        );
    }

    #[test]
    fn test_airport_code_rules() {
        assert!(Validator::validate_origin(Some(" jfk ")).is_ok());
        assert_eq!(
            Validator::validate_origin(Some("")),
            Err(ValidationError::OriginRequired)
        );
        assert_eq!(
            Validator::validate_origin(Some("JF")),
            Err(ValidationError::OriginLength)
        );
        assert_eq!(
            Validator::validate_destination(Some("LAXX")),
            Err(ValidationError::DestinationLength)
        );
        assert!(Validator::validate_destination(Some("ÅLE")).is_ok());
    }

    #[test]
    fn test_enum_rules_are_exact() {
        assert!(Validator::validate_type(Some("Arrival")).is_ok());
        assert!(Validator::validate_type(Some("arrival")).is_err());
        assert!(Validator::validate_type(Some(" Arrival")).is_err());
        assert!(Validator::validate_status(Some("Cancelled")).is_ok());
        assert!(Validator::validate_status(Some("")).is_err());
        assert!(Validator::validate_status(None).is_err());
    }

    #[test]
    fn test_scheduled_time_rules() {
        assert!(Validator::validate_scheduled_time(Some("2024-06-01T12:00")).is_ok());
        assert_eq!(
            Validator::validate_scheduled_time(Some("")),
            Err(ValidationError::ScheduledTimeRequired)
        );
        assert_eq!(
            Validator::validate_scheduled_time(Some("tomorrow")),
            Err(ValidationError::ScheduledTimeInvalid)
        );
    }

    #[test]
    fn test_gate_is_unconstrained() {
        let mut input = valid_input();
        input.gate = Some("   anything goes -- 42".to_string());
        assert!(Validator::validate_flight(&input, false).is_valid());
    }

    #[test]
    fn test_report_serializes_as_map() {
        let report = Validator::validate_flight(&without("airline"), false);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "airline": "Airline is required" }));
    }
}
