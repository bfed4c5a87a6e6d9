use serde::Deserialize;

use crate::flight::Flight;

/// Filter value meaning "do not filter on this field".
pub const ALL: &str = "All";

/// The only supported sort key.
pub const SORT_BY_SCHEDULED_TIME: &str = "scheduledTime";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// List parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    #[serde(rename = "type")]
    pub flight_type: Option<String>,
    pub airline: Option<String>,
    pub status: Option<String>,
    /// Case-insensitive substring of the flight number.
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl FlightQuery {
    /// The effective sort, if any. Unknown sort keys mean no sorting.
    pub fn sort(&self) -> Option<SortOrder> {
        if self.sort_by.as_deref() != Some(SORT_BY_SCHEDULED_TIME) {
            return None;
        }
        match self.order.as_deref() {
            Some("desc") => Some(SortOrder::Desc),
            _ => Some(SortOrder::Asc),
        }
    }

    /// Whether `flight` passes every supplied filter.
    pub fn matches(&self, flight: &Flight) -> bool {
        if let Some(t) = active_filter(&self.flight_type) {
            if flight.flight_type.as_str() != t {
                return false;
            }
        }
        if let Some(airline) = active_filter(&self.airline) {
            if flight.airline != airline {
                return false;
            }
        }
        if let Some(status) = active_filter(&self.status) {
            if flight.status.as_str() != status {
                return false;
            }
        }
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            if !flight
                .flight_number
                .to_lowercase()
                .contains(&q.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Filter then sort. Sorting is stable, so ties keep collection order.
    pub fn apply<'a>(&self, flights: impl IntoIterator<Item = &'a Flight>) -> Vec<Flight> {
        let mut result: Vec<Flight> = flights
            .into_iter()
            .filter(|f| self.matches(f))
            .cloned()
            .collect();

        match self.sort() {
            Some(SortOrder::Asc) => result.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time)),
            Some(SortOrder::Desc) => {
                result.sort_by(|a, b| b.scheduled_time.cmp(&a.scheduled_time))
            }
            None => {}
        }
        result
    }
}

/// A filter is active when present, non-empty and not the "All" sentinel.
fn active_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != ALL)
}
