//! Flightboard Core - Flight model, validation, and the in-memory store.
//!
//! This crate holds the domain logic of the flight board: the field rules
//! applied to create/update payloads and the filter/sort pipeline over the
//! flight collection. It has no HTTP or async dependencies.

pub mod error;
pub mod flight;
pub mod query;
pub mod store;
pub mod time;
pub mod validation;

// Re-exports for convenience
pub use error::{NormalizeError, StoreError, ValidationError};
pub use flight::{Flight, FlightFields, FlightInput, FlightStatus, FlightType};
pub use query::{FlightQuery, SortOrder, ALL};
pub use store::FlightStore;
pub use validation::{ValidationReport, Validator};
