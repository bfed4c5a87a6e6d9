use thiserror::Error;

/// A single violated field rule. The display text is the message shown to
/// API callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Flight Number is required")]
    FlightNumberRequired,

    #[error("Flight Number must be alphanumeric")]
    FlightNumberFormat,

    #[error("Airline is required")]
    AirlineRequired,

    #[error("Type must be one of: Departure, Arrival")]
    InvalidType,

    #[error("Origin is required")]
    OriginRequired,

    #[error("Origin must be 3 characters (IATA code)")]
    OriginLength,

    #[error("Destination is required")]
    DestinationRequired,

    #[error("Destination must be 3 characters (IATA code)")]
    DestinationLength,

    #[error("Scheduled Time is required")]
    ScheduledTimeRequired,

    #[error("Scheduled Time must be a valid date")]
    ScheduledTimeInvalid,

    #[error("Status must be one of: On Time, Delayed, Boarding, Cancelled, Landed")]
    InvalidStatus,
}

impl ValidationError {
    /// Name of the payload field this error is reported under.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::FlightNumberRequired | ValidationError::FlightNumberFormat => {
                "flightNumber"
            }
            ValidationError::AirlineRequired => "airline",
            ValidationError::InvalidType => "type",
            ValidationError::OriginRequired | ValidationError::OriginLength => "origin",
            ValidationError::DestinationRequired | ValidationError::DestinationLength => {
                "destination"
            }
            ValidationError::ScheduledTimeRequired | ValidationError::ScheduledTimeInvalid => {
                "scheduledTime"
            }
            ValidationError::InvalidStatus => "status",
        }
    }
}

/// A candidate could not be turned into a stored record. Only reachable when a
/// caller skips validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("Unknown flight type: {0}")]
    UnknownType(String),

    #[error("Unknown flight status: {0}")]
    UnknownStatus(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Flight not found: {0}")]
    NotFound(u64),

    #[error("No flight ids left to assign")]
    IdsExhausted,

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
}
