use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::NormalizeError;
use crate::time::{self, parse_timestamp};

/// Direction of a flight relative to this airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightType {
    Departure,
    Arrival,
}

impl FlightType {
    pub const ALL: [FlightType; 2] = [FlightType::Departure, FlightType::Arrival];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::Departure => "Departure",
            FlightType::Arrival => "Arrival",
        }
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightType {
    type Err = NormalizeError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NormalizeError::UnknownType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    Cancelled,
    Landed,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 5] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Boarding,
        FlightStatus::Cancelled,
        FlightStatus::Landed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Landed => "Landed",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| NormalizeError::UnknownStatus(s.to_string()))
    }
}

/// A stored flight record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: u64,
    pub flight_number: String,
    pub airline: String,
    #[serde(rename = "type")]
    pub flight_type: FlightType,
    pub origin: String,
    pub destination: String,
    #[serde(with = "time::iso_millis")]
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub gate: String,
    pub status: FlightStatus,
}

impl Flight {
    pub fn new(id: u64, fields: FlightFields) -> Self {
        Self {
            id,
            flight_number: fields.flight_number,
            airline: fields.airline,
            flight_type: fields.flight_type,
            origin: fields.origin,
            destination: fields.destination,
            scheduled_time: fields.scheduled_time,
            gate: fields.gate,
            status: fields.status,
        }
    }
}

/// Candidate payload for create and update.
///
/// Every field is optional so that presence can be told apart from content.
/// A JSON `null` is treated as present but empty. Keys not listed here,
/// including any caller-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flight_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub airline: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "null_as_empty")]
    pub flight_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scheduled_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gate: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

impl FlightInput {
    /// Lay `overlay` on top of `self`. Fields present in the overlay win,
    /// everything else is kept.
    pub fn overlay(self, overlay: FlightInput) -> FlightInput {
        FlightInput {
            flight_number: overlay.flight_number.or(self.flight_number),
            airline: overlay.airline.or(self.airline),
            flight_type: overlay.flight_type.or(self.flight_type),
            origin: overlay.origin.or(self.origin),
            destination: overlay.destination.or(self.destination),
            scheduled_time: overlay.scheduled_time.or(self.scheduled_time),
            gate: overlay.gate.or(self.gate),
            status: overlay.status.or(self.status),
        }
    }
}

impl From<&Flight> for FlightInput {
    fn from(flight: &Flight) -> Self {
        FlightInput {
            flight_number: Some(flight.flight_number.clone()),
            airline: Some(flight.airline.clone()),
            flight_type: Some(flight.flight_type.to_string()),
            origin: Some(flight.origin.clone()),
            destination: Some(flight.destination.clone()),
            scheduled_time: Some(time::format_timestamp(&flight.scheduled_time)),
            gate: Some(flight.gate.clone()),
            status: Some(flight.status.to_string()),
        }
    }
}

/// Normalized flight fields, everything but the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightFields {
    pub flight_number: String,
    pub airline: String,
    pub flight_type: FlightType,
    pub origin: String,
    pub destination: String,
    pub scheduled_time: DateTime<Utc>,
    pub gate: String,
    pub status: FlightStatus,
}

impl FlightFields {
    /// Trim text fields, upper-case airport codes, resolve the time to UTC
    /// (millisecond precision) and parse the enums. `gate` defaults to "".
    pub fn normalize(input: &FlightInput) -> Result<Self, NormalizeError> {
        let flight_number = required(&input.flight_number, "flightNumber")?.trim();
        let airline = required(&input.airline, "airline")?.trim();
        let flight_type: FlightType = required(&input.flight_type, "type")?.parse()?;
        let origin = required(&input.origin, "origin")?.trim().to_uppercase();
        let destination = required(&input.destination, "destination")?
            .trim()
            .to_uppercase();

        let raw_time = required(&input.scheduled_time, "scheduledTime")?;
        let scheduled_time = parse_timestamp(raw_time)
            .ok_or_else(|| NormalizeError::InvalidTime(raw_time.to_string()))?
            .trunc_subsecs(3);

        let gate = input
            .gate
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let status: FlightStatus = required(&input.status, "status")?.parse()?;

        Ok(FlightFields {
            flight_number: flight_number.to_string(),
            airline: airline.to_string(),
            flight_type,
            origin,
            destination,
            scheduled_time,
            gate,
            status,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, NormalizeError> {
    value.as_deref().ok_or(NormalizeError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_input() -> FlightInput {
        FlightInput {
            flight_number: Some("  AA101 ".to_string()),
            airline: Some(" American Airlines ".to_string()),
            flight_type: Some("Departure".to_string()),
            origin: Some(" jfk".to_string()),
            destination: Some("lax ".to_string()),
            scheduled_time: Some("2024-03-10T10:30:00+02:00".to_string()),
            gate: Some(" B12 ".to_string()),
            status: Some("On Time".to_string()),
        }
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        let fields = FlightFields::normalize(&sample_input()).unwrap();

        assert_eq!(fields.flight_number, "AA101");
        assert_eq!(fields.airline, "American Airlines");
        assert_eq!(fields.flight_type, FlightType::Departure);
        assert_eq!(fields.origin, "JFK");
        assert_eq!(fields.destination, "LAX");
        assert_eq!(
            fields.scheduled_time,
            Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
        );
        assert_eq!(fields.gate, "B12");
        assert_eq!(fields.status, FlightStatus::OnTime);
    }

    #[test]
    fn test_normalize_defaults_gate() {
        let mut input = sample_input();
        input.gate = None;
        assert_eq!(FlightFields::normalize(&input).unwrap().gate, "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = Flight::new(1, FlightFields::normalize(&sample_input()).unwrap());
        let second = Flight::new(1, FlightFields::normalize(&FlightInput::from(&first)).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_truncates_to_millis() {
        let mut input = sample_input();
        input.scheduled_time = Some("2024-03-10T08:30:00.123456789Z".to_string());
        let fields = FlightFields::normalize(&input).unwrap();
        assert_eq!(fields.scheduled_time.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_normalize_errors() {
        let mut input = sample_input();
        input.airline = None;
        assert_eq!(
            FlightFields::normalize(&input),
            Err(NormalizeError::MissingField("airline"))
        );

        let mut input = sample_input();
        input.scheduled_time = Some("soon".to_string());
        assert_eq!(
            FlightFields::normalize(&input),
            Err(NormalizeError::InvalidTime("soon".to_string()))
        );

        let mut input = sample_input();
        input.status = Some("on time".to_string());
        assert_eq!(
            FlightFields::normalize(&input),
            Err(NormalizeError::UnknownStatus("on time".to_string()))
        );
    }

    #[test]
    fn test_overlay_prefers_present_fields() {
        let base = sample_input();
        let overlay = FlightInput {
            status: Some("Delayed".to_string()),
            gate: Some(String::new()),
            ..Default::default()
        };

        let merged = base.clone().overlay(overlay);
        assert_eq!(merged.status.as_deref(), Some("Delayed"));
        assert_eq!(merged.gate.as_deref(), Some(""));
        assert_eq!(merged.flight_number, base.flight_number);
        assert_eq!(merged.origin, base.origin);
    }

    #[test]
    fn test_input_null_is_present_and_empty() {
        let input: FlightInput =
            serde_json::from_str(r#"{"airline": null, "type": "Arrival", "id": 42}"#).unwrap();

        assert_eq!(input.airline.as_deref(), Some(""));
        assert_eq!(input.flight_type.as_deref(), Some("Arrival"));
        assert!(input.flight_number.is_none());
        assert!(input.gate.is_none());
    }

    #[test]
    fn test_flight_json_shape() {
        let flight = Flight::new(3, FlightFields::normalize(&sample_input()).unwrap());
        let json = serde_json::to_value(&flight).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["flightNumber"], "AA101");
        assert_eq!(json["type"], "Departure");
        assert_eq!(json["scheduledTime"], "2024-03-10T08:30:00.000Z");
        assert_eq!(json["status"], "On Time");

        let back: Flight = serde_json::from_value(json).unwrap();
        assert_eq!(back, flight);
    }

    #[test]
    fn test_enum_parsing_is_exact() {
        assert_eq!("Arrival".parse::<FlightType>().unwrap(), FlightType::Arrival);
        assert!("arrival".parse::<FlightType>().is_err());
        assert_eq!("On Time".parse::<FlightStatus>().unwrap(), FlightStatus::OnTime);
        assert!("OnTime".parse::<FlightStatus>().is_err());
    }
}
