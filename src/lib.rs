//! Flightboard - Axum server for the in-memory flight board.

pub mod config;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::Config;
pub use models::{ApiError, ErrorResponse, HealthResponse, ValidationErrorResponse};
pub use routes::{create_router, create_router_with_origins};
pub use seed::load_store;
pub use state::AppState;
