use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use skyvoyage_order::Booking;

use crate::error::AppError;
use crate::extract::{Path, Query};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub username: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/{reference}", get(get_booking))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let username = query.username.trim();
    if username.is_empty() {
        return Err(AppError::ValidationError("username is required".to_string()));
    }
    Ok(Json(state.bookings.list_for_user(username).await?))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Booking>, AppError> {
    state
        .bookings
        .get(&reference)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Booking not found: {}", reference)))
}
