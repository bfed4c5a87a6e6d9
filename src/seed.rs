use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use flightboard_core::{Flight, FlightFields, FlightInput, FlightStore, Validator};

/// A flight as it appears in a seed file: an id plus the usual payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub id: u64,
    #[serde(flatten)]
    pub input: FlightInput,
}

/// Build the initial store, from the JSON file at `path` when given and
/// readable, otherwise from the built-in dataset.
pub fn load_store(path: Option<&Path>) -> FlightStore {
    let records = path
        .and_then(read_seed_file)
        .unwrap_or_else(default_records);
    FlightStore::with_seed(seed_flights(records))
}

fn read_seed_file(path: &Path) -> Option<Vec<SeedRecord>> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!("Failed to parse seed file {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read seed file {}: {}", path.display(), e);
            None
        }
    }
}

/// Validate and normalize seed records. Invalid records, repeated ids and
/// `u64::MAX` (which would leave no id for new flights) are skipped with a
/// warning.
pub fn seed_flights(records: Vec<SeedRecord>) -> Vec<Flight> {
    let mut seen = HashSet::new();
    let mut flights = Vec::with_capacity(records.len());

    for record in records {
        if record.id == u64::MAX {
            tracing::warn!("Skipping seed flight {}: id out of range", record.id);
            continue;
        }

        if !seen.insert(record.id) {
            tracing::warn!("Skipping seed flight {}: duplicate id", record.id);
            continue;
        }

        let report = Validator::validate_flight(&record.input, false);
        if !report.is_valid() {
            tracing::warn!(
                "Skipping seed flight {}: {:?}",
                record.id,
                report.errors()
            );
            continue;
        }

        match FlightFields::normalize(&record.input) {
            Ok(fields) => flights.push(Flight::new(record.id, fields)),
            Err(e) => tracing::warn!("Skipping seed flight {}: {}", record.id, e),
        }
    }

    flights
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: u64,
    flight_number: &str,
    airline: &str,
    flight_type: &str,
    route: (&str, &str),
    scheduled_time: &str,
    gate: &str,
    status: &str,
) -> SeedRecord {
    SeedRecord {
        id,
        input: FlightInput {
            flight_number: Some(flight_number.to_string()),
            airline: Some(airline.to_string()),
            flight_type: Some(flight_type.to_string()),
            origin: Some(route.0.to_string()),
            destination: Some(route.1.to_string()),
            scheduled_time: Some(scheduled_time.to_string()),
            gate: Some(gate.to_string()),
            status: Some(status.to_string()),
        },
    }
}

/// Built-in dataset used when no seed file is configured.
pub fn default_records() -> Vec<SeedRecord> {
    vec![
        record(
            1,
            "AA101",
            "American Airlines",
            "Departure",
            ("JFK", "LAX"),
            "2024-06-01T08:00:00.000Z",
            "A1",
            "On Time",
        ),
        record(
            2,
            "BA202",
            "British Airways",
            "Arrival",
            ("LHR", "JFK"),
            "2024-06-01T09:30:00.000Z",
            "B4",
            "Delayed",
        ),
        record(
            3,
            "DL303",
            "Delta Air Lines",
            "Departure",
            ("JFK", "ATL"),
            "2024-06-01T07:15:00.000Z",
            "C2",
            "Boarding",
        ),
        record(
            4,
            "UA404",
            "United Airlines",
            "Arrival",
            ("ORD", "JFK"),
            "2024-06-01T11:45:00.000Z",
            "",
            "Landed",
        ),
        record(
            5,
            "LH505",
            "Lufthansa",
            "Departure",
            ("JFK", "FRA"),
            "2024-06-01T13:20:00.000Z",
            "D7",
            "Cancelled",
        ),
    ]
}
