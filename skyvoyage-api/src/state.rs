use skyvoyage_catalog::FlightCatalog;
use skyvoyage_core::SeatError;
use skyvoyage_store::{BookingRepository, Config, InMemoryBookingRepository};
use std::sync::Arc;

use crate::session_store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<FlightCatalog>,
    pub sessions: SessionStore,
    pub bookings: Arc<dyn BookingRepository>,
}

impl AppState {
    /// Mock catalog, in-memory bookings. Fails if the configured seat map is invalid.
    pub fn new(config: Config) -> Result<Self, SeatError> {
        let sessions = SessionStore::new(
            config.seat_map.layout()?,
            config.seat_map.policy(),
            config.sessions.max_passengers,
        );

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(FlightCatalog::mock()),
            sessions,
            bookings: Arc::new(InMemoryBookingRepository::new()),
        })
    }
}
