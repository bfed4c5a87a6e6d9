use crate::error::StoreError;
use crate::flight::{Flight, FlightFields, FlightInput};
use crate::query::FlightQuery;

/// In-memory flight collection.
///
/// Records keep insertion order. Ids come from a monotonically increasing
/// counter and are never reused, not even after a delete. The store does not
/// validate: callers run [`crate::Validator`] before `insert` and `replace`.
#[derive(Debug, Clone)]
pub struct FlightStore {
    flights: Vec<Flight>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl Default for FlightStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightStore {
    pub fn new() -> Self {
        Self {
            flights: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Create a store holding `seed`. The next id is one past the largest
    /// seeded id; a seed holding `u64::MAX` leaves no id for inserts.
    pub fn with_seed(seed: Vec<Flight>) -> Self {
        let next_id = match seed.iter().map(|f| f.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            flights: seed,
            next_id,
        }
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Id the next insert will receive, `None` when ids are exhausted.
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    /// Filtered and optionally sorted copy of the collection.
    pub fn list(&self, query: &FlightQuery) -> Vec<Flight> {
        query.apply(&self.flights)
    }

    pub fn get(&self, id: u64) -> Result<Flight, StoreError> {
        self.flights
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Normalize `input`, assign the next id and append.
    /// The id counter only advances once normalization has succeeded.
    pub fn insert(&mut self, input: &FlightInput) -> Result<Flight, StoreError> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let fields = FlightFields::normalize(input)?;
        let flight = Flight::new(id, fields);
        self.next_id = id.checked_add(1);
        self.flights.push(flight.clone());
        Ok(flight)
    }

    /// The stored record as a candidate with `overlay`'s present fields on
    /// top. Validate the result before passing it to [`FlightStore::replace`].
    pub fn merge(&self, id: u64, overlay: FlightInput) -> Result<FlightInput, StoreError> {
        let existing = self.position(id).map(|i| &self.flights[i])?;
        Ok(FlightInput::from(existing).overlay(overlay))
    }

    /// Overwrite the record in place with the normalized `candidate`.
    /// Id and position are kept. Nothing changes on error.
    pub fn replace(&mut self, id: u64, candidate: &FlightInput) -> Result<Flight, StoreError> {
        let index = self.position(id)?;
        let fields = FlightFields::normalize(candidate)?;
        let flight = Flight::new(id, fields);
        self.flights[index] = flight.clone();
        Ok(flight)
    }

    /// Remove and return the record.
    pub fn delete(&mut self, id: u64) -> Result<Flight, StoreError> {
        let index = self.position(id)?;
        Ok(self.flights.remove(index))
    }

    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.flights
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}
