use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use flightboard_core::{Flight, FlightInput, FlightQuery, Validator};

use crate::models::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights", get(list_flights).post(create_flight))
        .route(
            "/api/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}

/// Ids that are not non-negative integers can never match a record.
/// The whole segment must be numeric: `12abc` is not read as flight 12.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound)
}

fn payload(body: Result<Json<FlightInput>, JsonRejection>) -> Result<FlightInput, ApiError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /api/flights?type=&airline=&status=&q=&sortBy=&order=
async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<FlightQuery>, QueryRejection>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let store = state.store.read().await;
    Ok(Json(store.list(&query)))
}

/// GET /api/flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flight>, ApiError> {
    let id = parse_id(&id)?;
    let store = state.store.read().await;
    Ok(Json(store.get(id)?))
}

/// POST /api/flights - Create a flight. The id is assigned by the store.
async fn create_flight(
    State(state): State<AppState>,
    body: Result<Json<FlightInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Flight>), ApiError> {
    let input = payload(body)?;

    let report = Validator::validate_flight(&input, false);
    if !report.is_valid() {
        tracing::debug!("Rejected new flight: {:?}", report.errors());
        return Err(ApiError::Validation(report));
    }

    let flight = state.store.write().await.insert(&input)?;
    tracing::info!("Created flight {} ({})", flight.id, flight.flight_number);

    Ok((StatusCode::CREATED, Json(flight)))
}

/// PUT /api/flights/{id} - Overlay the payload on the stored flight.
/// The merged record must pass full validation before it is written.
async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FlightInput>, JsonRejection>,
) -> Result<Json<Flight>, ApiError> {
    let id = parse_id(&id)?;
    let overlay = payload(body)?;

    let mut store = state.store.write().await;
    let merged = store.merge(id, overlay)?;

    let report = Validator::validate_flight(&merged, false);
    if !report.is_valid() {
        tracing::debug!("Rejected update of flight {}: {:?}", id, report.errors());
        return Err(ApiError::Validation(report));
    }

    let flight = store.replace(id, &merged)?;
    tracing::info!("Updated flight {} ({})", flight.id, flight.flight_number);

    Ok(Json(flight))
}

/// DELETE /api/flights/{id}
async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let removed = state.store.write().await.delete(id)?;
    tracing::info!("Deleted flight {} ({})", removed.id, removed.flight_number);

    Ok(StatusCode::NO_CONTENT)
}
