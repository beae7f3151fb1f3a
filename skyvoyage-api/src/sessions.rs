use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skyvoyage_core::{SeatId, ToggleOutcome};
use skyvoyage_order::{Booking, Contact, PassengerName};
use skyvoyage_shared::models::events::{BookingConfirmedEvent, SessionEvent, SessionEventKind};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{JsonBody, Path};
use crate::session_store::SessionSnapshot;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub passengers: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SelectFlightRequest {
    pub flight_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PassengerCountRequest {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ToggleSeatResponse {
    pub outcome: ToggleOutcome,
    pub selection: Vec<SeatId>,
    pub complete: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub username: String,
    pub email: String,
    pub passengers: Vec<PassengerName>,
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session))
        .route("/sessions/{id}/flight", put(select_flight))
        .route("/sessions/{id}/passengers", put(set_passengers))
        .route("/sessions/{id}/seats", delete(clear_seats))
        .route("/sessions/{id}/seats/{seat}", post(toggle_seat))
        .route("/sessions/{id}/bookings", post(checkout))
}

/// The body is optional; an empty one means one passenger.
async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let req: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::ValidationError(format!("Invalid request body: {}", e)))?
    };

    let snapshot = state.sessions.create(req.passengers).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

async fn select_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<SelectFlightRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let flight = state.catalog.get(&req.flight_id)?.clone();

    let snapshot = state
        .sessions
        .with_session(id, |session| {
            session.select_flight(flight);
            Ok(SessionSnapshot::of(id, session))
        })
        .await?;

    info!(event = ?SessionEvent::new(id, SessionEventKind::FlightSelected, Some(req.flight_id), snapshot.passengers));
    Ok(Json(snapshot))
}

async fn set_passengers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<PassengerCountRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |session| {
            session.set_passenger_count(req.count)?;
            Ok(SessionSnapshot::of(id, session))
        })
        .await?;

    let flight_id = snapshot.flight.as_ref().map(|f| f.id.clone());
    info!(event = ?SessionEvent::new(id, SessionEventKind::PassengersChanged, flight_id, snapshot.passengers));
    Ok(Json(snapshot))
}

async fn toggle_seat(
    State(state): State<AppState>,
    Path((id, seat)): Path<(Uuid, String)>,
) -> Result<Json<ToggleSeatResponse>, AppError> {
    let seat: SeatId = seat.parse()?;

    let response = state
        .sessions
        .with_session(id, |session| {
            let outcome = session.toggle_seat(seat)?;
            Ok(ToggleSeatResponse {
                outcome,
                selection: session.selection().to_vec(),
                complete: session.engine().is_complete(),
            })
        })
        .await?;

    Ok(Json(response))
}

async fn clear_seats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |session| {
            session.clear_seats();
            Ok(SessionSnapshot::of(id, session))
        })
        .await?;
    Ok(Json(snapshot))
}

async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let contact = Contact::new(req.username, req.email);

    let booking = state
        .sessions
        .checkout(id, state.bookings.as_ref(), &contact, &req.passengers, req.date)
        .await?;

    let event = BookingConfirmedEvent {
        session_id: id,
        reference: booking.reference.clone(),
        username: booking.username.clone(),
        email: booking.email.clone(),
        flight_id: booking.flight.id.clone(),
        seats: booking.seats.iter().map(|s| s.to_string()).collect(),
        total_price_cents: booking.total_price_cents,
        timestamp: Utc::now(),
    };
    info!(?event, "Booking stored");

    Ok((StatusCode::CREATED, Json(booking)))
}
