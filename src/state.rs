use std::sync::Arc;

use tokio::sync::RwLock;

use flightboard_core::FlightStore;

/// Application state shared across handlers.
///
/// The store sits behind a single lock. Mutating handlers hold the write lock
/// for the whole validate-and-commit sequence.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<FlightStore>>,
}

impl AppState {
    pub fn new(store: FlightStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
