use axum::{extract::State, routing::get, Json, Router};
use skyvoyage_catalog::{AirportInfo, Availability, Flight, FlightQuery};
use serde::Serialize;

use crate::error::AppError;
use crate::extract::{Path, Query};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    #[serde(flatten)]
    pub flight: Flight,
    pub availability: Availability,
    pub price_display: String,
}

impl From<Flight> for FlightResponse {
    fn from(flight: Flight) -> Self {
        Self {
            availability: Availability::of(flight.seats_available),
            price_display: skyvoyage_catalog::format_price(flight.price_cents),
            flight,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights))
        .route("/flights/{id}", get(get_flight))
        .route("/airports", get(list_airports))
}

async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> Result<Json<Vec<FlightResponse>>, AppError> {
    let flights = state.catalog.search(&query)?;
    Ok(Json(flights.into_iter().map(FlightResponse::from).collect()))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = state.catalog.get(&id)?.clone();
    Ok(Json(flight.into()))
}

async fn list_airports(State(state): State<AppState>) -> Json<Vec<AirportInfo>> {
    Json(state.catalog.airports())
}
